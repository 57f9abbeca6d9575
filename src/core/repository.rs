//! 存储层抽象
//!
//! 两个实体共享同一组能力：新增、按 id 查询、分页查询、整体替换、删除。
//! 每种存储后端为每个实体各提供一个实现。

use async_trait::async_trait;

use super::pagination::{Page, PageRequest};

pub type StoreResult<T> = Result<T, sqlx::Error>;

/// 带数据库主键的实体
pub trait Entity: Send + Sync + 'static {
    /// 不含 id 的可持久化内容
    type Draft: Send + Sync + 'static;

    fn id(&self) -> i64;
}

#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// 插入新行，id 由存储分配
    async fn insert(&self, draft: E::Draft) -> StoreResult<E>;

    /// 覆盖已有行的全部可变字段；行不存在时返回 `None`
    async fn replace(&self, id: i64, draft: E::Draft) -> StoreResult<Option<E>>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<E>>;

    /// 按插入顺序（id 升序）分页
    async fn find_all(&self, request: PageRequest) -> StoreResult<Page<E>>;

    /// 删除成功返回 `true`，行不存在返回 `false`
    async fn delete_by_id(&self, id: i64) -> StoreResult<bool>;

    async fn count(&self) -> StoreResult<i64>;
}
