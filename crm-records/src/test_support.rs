use tempfile::TempDir;

use crate::context::CrmContext;

pub(crate) async fn setup() -> (CrmContext, TempDir) {
    let temp = TempDir::new().unwrap();
    let ctx = CrmContext::open(temp.path()).await.unwrap();
    (ctx, temp)
}
