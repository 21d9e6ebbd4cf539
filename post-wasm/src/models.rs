use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
}
