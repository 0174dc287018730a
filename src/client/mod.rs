use cynic::http::{CynicReqwestError, ReqwestExt};
use cynic::serde;
use reqwest::Url;

pub struct Client {
    client: reqwest::Client,
    url: Url,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }

    pub async fn query<Query, Input>(
        &self,
        op: cynic::Operation<Query, Input>,
    ) -> Result<cynic::GraphQlResponse<Query>, CynicReqwestError>
    where
        Input: serde::Serialize,
        Query: serde::de::DeserializeOwned + 'static,
    {
        self.client.post(self.url.clone()).run_graphql(op).await
    }
}

#[cynic::schema("catalog")]
mod schema {}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Library {
    pub authors: Vec<Author>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Author {
    pub id: String,
    pub last_name: String,
    pub books: Vec<BookTitle>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Book")]
pub struct BookTitle {
    pub title: String,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct ByIdVariables {
    pub id: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "ByIdVariables")]
pub struct BookById {
    #[arguments(id: $id)]
    pub book_by_id: Option<Book>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Book {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub page_count: i32,
    pub moby: bool,
    pub author: Option<AuthorName>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Author")]
pub struct AuthorName {
    pub first_name: String,
    pub last_name: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "ByIdVariables")]
pub struct AuthorById {
    #[arguments(id: $id)]
    pub author_by_id: Option<AuthorName>,
}
