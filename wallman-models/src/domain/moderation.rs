use crate::enums::catalog::AdminRole;
use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AbuseReport {
    pub abuse_description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AdminMessage {
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AddAdmin {
    pub email: String,
    #[serde(rename = "type")]
    pub role: AdminRole,
}
