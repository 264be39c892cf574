//! # Persistence Context
//!
//! 요청 하나에 대응하는 영속성 컨텍스트(unit of work)입니다.
//!
//! ```text
//! Repository ──stage()──► [StagedChange, ...] ──save_changes()──► BEGIN; ...; COMMIT
//!     │
//!     └─track()/snapshot()──► ChangeTracker (table:pk → 마지막으로 알려진 모델)
//! ```
//!
//! - 리포지토리는 SQL 문을 직접 실행하지 않고 컨텍스트에 적재(stage)합니다.
//! - `save_changes()`는 적재된 문장들을 하나의 트랜잭션에서 실행합니다.
//!   실패하면 트랜잭션은 롤백되고 적재 목록은 비워집니다.
//! - 변경 추적기는 추적 조회(tracked read)된 행의 스냅샷을 보관하여,
//!   이후 `update` 시 바뀐 컬럼만 기록할 수 있게 합니다.
//!
//! 컨텍스트는 요청 스코프에서 처음 해석될 때 생성되고 요청과 함께 폐기됩니다.
//! 연결은 열지 않으며, 애플리케이션 싱글톤인 [`Database`]의 풀을 공유합니다.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, EntityTrait, Iterable,
    ModelTrait, PrimaryKeyToColumn, Statement, TransactionTrait,
};

use crate::core::registry::{Bucket, ComponentRegistration, RegistryBuilder};
use crate::db::Database;

/// 커밋 대기 중인 SQL 문
#[derive(Debug)]
struct StagedChange {
    statement: Statement,
    /// `true`면 영향받은 행이 0일 때 커밋 전체를 실패시킵니다 (update/delete).
    require_rows: bool,
}

pub struct DbContext {
    connection: DatabaseConnection,
    staged: Mutex<Vec<StagedChange>>,
    tracker: Mutex<HashMap<String, Box<dyn Any + Send>>>,
}

impl DbContext {
    pub fn new(connection: DatabaseConnection) -> Self {
        Self {
            connection,
            staged: Mutex::new(Vec::new()),
            tracker: Mutex::new(HashMap::new()),
        }
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.connection
    }

    pub fn backend(&self) -> DbBackend {
        self.connection.get_database_backend()
    }

    /// 변경 문장을 적재합니다. 실행은 [`DbContext::save_changes`]에서 일어납니다.
    pub fn stage(&self, statement: Statement, require_rows: bool) {
        lock(&self.staged).push(StagedChange {
            statement,
            require_rows,
        });
    }

    pub fn pending_changes(&self) -> usize {
        lock(&self.staged).len()
    }

    /// 적재된 모든 변경을 하나의 트랜잭션으로 커밋합니다.
    ///
    /// 영향받은 전체 행 수를 반환합니다. 행을 요구하는 문장이 아무 행도 바꾸지
    /// 못하면 `DbErr::RecordNotUpdated`로 실패하고 트랜잭션은 롤백됩니다.
    pub async fn save_changes(&self) -> Result<u64, DbErr> {
        let staged = std::mem::take(&mut *lock(&self.staged));
        if staged.is_empty() {
            return Ok(0);
        }

        let statement_count = staged.len();
        let txn = self.connection.begin().await?;
        let mut affected = 0;

        for change in staged {
            let result = txn.execute(change.statement).await?;
            if change.require_rows && result.rows_affected() == 0 {
                log::debug!("변경 대상 행이 없어 트랜잭션을 롤백합니다");
                return Err(DbErr::RecordNotUpdated);
            }
            affected += result.rows_affected();
        }

        txn.commit().await?;
        log::debug!("커밋 완료: {}개 문장, {}개 행", statement_count, affected);
        Ok(affected)
    }

    /// 모델의 현재 상태를 스냅샷으로 기록합니다.
    pub(crate) fn track<E>(&self, model: &E::Model)
    where
        E: EntityTrait,
        E::Model: Clone + Send + 'static,
    {
        lock(&self.tracker).insert(tracking_key::<E>(model), Box::new(model.clone()));
    }

    pub(crate) fn snapshot<E>(&self, model: &E::Model) -> Option<E::Model>
    where
        E: EntityTrait,
        E::Model: Clone + Send + 'static,
    {
        lock(&self.tracker)
            .get(&tracking_key::<E>(model))
            .and_then(|entry| entry.downcast_ref::<E::Model>())
            .cloned()
    }

    pub(crate) fn forget<E>(&self, model: &E::Model)
    where
        E: EntityTrait,
    {
        lock(&self.tracker).remove(&tracking_key::<E>(model));
    }

    pub fn is_tracked<E>(&self, model: &E::Model) -> bool
    where
        E: EntityTrait,
    {
        lock(&self.tracker).contains_key(&tracking_key::<E>(model))
    }

    pub fn tracked_count(&self) -> usize {
        lock(&self.tracker).len()
    }
}

/// 추적 키: `테이블명:기본키값`
fn tracking_key<E: EntityTrait>(model: &E::Model) -> String {
    let key_values: Vec<String> = E::PrimaryKey::iter()
        .map(|key| format!("{:?}", model.get(key.into_column())))
        .collect();
    format!("{}:{}", E::default().table_name(), key_values.join(","))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn register(builder: &mut RegistryBuilder) {
    builder.scoped::<DbContext, _>(Bucket::Contexts, "DbContext", |scope| {
        let database = scope.resolve::<Database>()?;
        Ok(Arc::new(DbContext::new(database.connection().clone())))
    });
}

inventory::submit! {
    ComponentRegistration {
        bucket: Bucket::Contexts,
        name: "DbContext",
        register,
    }
}
