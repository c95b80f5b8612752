use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub pages: u32,
    pub records: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}
