//! # Query Specification
//!
//! 리포지토리 조회에 전달되는 질의 명세입니다.
//!
//! - **read_only**: `true`면 결과가 변경 추적기에 등록되지 않습니다.
//! - **filter**: `sea_orm::Condition` 조건식 (없으면 전체)
//! - **includes**: 조회 후 관련 객체를 채우는 eager-load 지시자 목록
//! - **order**: 정렬 컬럼과 방향 (페이지 조회에서는 필수)
//!
//! ```rust,ignore
//! let spec = QuerySpec::<product::Entity>::read_only()
//!     .filter(Condition::all().add(product::Column::CategoryId.eq(category_id)))
//!     .include(product::include_category())
//!     .order_by(product::Column::Name);
//! ```

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use sea_orm::sea_query::IntoCondition;
use sea_orm::{Condition, DatabaseConnection, DbErr, EntityTrait, Order};

use super::error::{RepositoryError, RepositoryResult};

type LoaderFn<M> = dyn for<'a> Fn(&'a DatabaseConnection, &'a mut [M]) -> BoxFuture<'a, Result<(), DbErr>>
    + Send
    + Sync;

/// 관련 객체 eager-load 지시자
///
/// 조회된 모델 슬라이스를 받아 연관 데이터를 채워 넣는 로더 함수를 감쌉니다.
/// 지시자는 등록 순서대로(left-to-right) 적용됩니다.
pub struct Include<M> {
    name: &'static str,
    loader: Arc<LoaderFn<M>>,
}

impl<M> Include<M> {
    pub fn new<F>(name: &'static str, loader: F) -> Self
    where
        F: for<'a> Fn(&'a DatabaseConnection, &'a mut [M]) -> BoxFuture<'a, Result<(), DbErr>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name,
            loader: Arc::new(loader),
        }
    }

    pub(crate) async fn load(&self, db: &DatabaseConnection, rows: &mut [M]) -> Result<(), DbErr> {
        (self.loader)(db, rows).await
    }
}

impl<M> Clone for Include<M> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            loader: Arc::clone(&self.loader),
        }
    }
}

impl<M> fmt::Debug for Include<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Include").field("name", &self.name).finish()
    }
}

/// 엔티티 `E`에 대한 조회 명세
pub struct QuerySpec<E: EntityTrait> {
    pub(crate) read_only: bool,
    pub(crate) filter: Option<Condition>,
    pub(crate) includes: Vec<Include<E::Model>>,
    pub(crate) order: Option<(E::Column, Order)>,
}

impl<E: EntityTrait> QuerySpec<E> {
    /// 추적 없는 조회 명세
    pub fn read_only() -> Self {
        Self {
            read_only: true,
            filter: None,
            includes: Vec::new(),
            order: None,
        }
    }

    /// 결과를 변경 추적기에 등록하는 조회 명세
    pub fn tracked() -> Self {
        Self {
            read_only: false,
            ..Self::read_only()
        }
    }

    /// 조건식 또는 단일 비교식(`Column::Name.eq(..)`)을 필터로 지정합니다.
    pub fn filter(mut self, condition: impl IntoCondition) -> Self {
        self.filter = Some(condition.into_condition());
        self
    }

    pub fn include(mut self, include: Include<E::Model>) -> Self {
        self.includes.push(include);
        self
    }

    pub fn order_by(mut self, column: E::Column) -> Self {
        self.order = Some((column, Order::Asc));
        self
    }

    pub fn order_by_desc(mut self, column: E::Column) -> Self {
        self.order = Some((column, Order::Desc));
        self
    }

    /// 정렬 방향을 플래그로 지정합니다.
    pub fn order(self, column: E::Column, descending: bool) -> Self {
        if descending {
            self.order_by_desc(column)
        } else {
            self.order_by(column)
        }
    }

    pub fn has_order(&self) -> bool {
        self.order.is_some()
    }
}

impl<E: EntityTrait> Default for QuerySpec<E> {
    fn default() -> Self {
        Self::tracked()
    }
}

/// 데이터베이스 드라이버가 받을 수 있는 최대 LIMIT/OFFSET 값
const MAX_BOUND: u64 = i64::MAX as u64;

/// 페이지 요청 (1부터 시작하는 페이지 번호)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Page {
    pub fn new(number: u64, size: u64) -> Self {
        Self { number, size }
    }

    /// 인자를 검증하고 건너뛸 행 수를 계산합니다.
    pub(crate) fn offset(&self) -> RepositoryResult<u64> {
        if self.number < 1 {
            return Err(RepositoryError::argument("page", "page number must be at least 1"));
        }
        if self.size == 0 {
            return Err(RepositoryError::argument("size", "page size must be greater than 0"));
        }
        if self.number > MAX_BOUND {
            return Err(RepositoryError::argument("page", "page number is too large"));
        }
        if self.size > MAX_BOUND {
            return Err(RepositoryError::argument("size", "page size is too large"));
        }
        (self.number - 1)
            .checked_mul(self.size)
            .filter(|offset| *offset <= MAX_BOUND)
            .ok_or_else(|| RepositoryError::argument("page", "page offset overflows"))
    }
}

/// 페이지 조회 결과
#[derive(Debug, Clone, PartialEq)]
pub struct PagedResult<M> {
    /// 페이지네이션을 무시한 전체 일치 건수
    pub total: u64,
    pub items: Vec<M>,
}
