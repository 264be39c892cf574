//! # Service Registry - 버킷 기반 의존성 주입 컨테이너
//!
//! 애플리케이션 싱글톤과 요청 스코프 컴포넌트를 관리하는 DI 컨테이너입니다.
//! 전역 상태를 두지 않고, `main`에서 한 번 만들어 `web::Data`로 공유합니다.
//!
//! ## 생명주기
//!
//! | 종류 | 생성 시점 | 공유 범위 | 예시 |
//! |------|-----------|-----------|------|
//! | Singleton | 시작 시 직접 등록 | 프로세스 전체 | `AppSettings`, `Database`, `TokenService` |
//! | Scoped | 요청 내 첫 해석 시 | 같은 요청 | `DbContext`, 리포지토리, 서비스, 도메인 핸들러 |
//!
//! ## 버킷 (등록 순서)
//!
//! ```text
//! 1. Contexts             ─ 영속성 컨텍스트 (DbContext)
//! 2. DomainHandlers       ─ 커맨드 처리 도메인 핸들러
//! 3. DataHandlers         ─ 엔티티별 리포지토리
//! 4. DataServiceHandlers  ─ 데이터 서비스 (리포지토리 조합)
//! ```
//!
//! ## 자동 등록 (Component Scanning)
//!
//! 각 모듈은 `inventory::submit!`으로 [`ComponentRegistration`]을 제출하고,
//! [`RegistryBuilder::discover`]가 버킷 순서대로 등록 함수를 호출합니다.
//!
//! ```rust,ignore
//! fn register(builder: &mut RegistryBuilder) {
//!     builder.scoped::<ProductService, _>(Bucket::DataServiceHandlers, "ProductService", |scope| {
//!         Ok(Arc::new(ProductService::new(scope.resolve()?, scope.resolve()?)))
//!     });
//! }
//!
//! inventory::submit! {
//!     ComponentRegistration { bucket: Bucket::DataServiceHandlers, name: "ProductService", register }
//! }
//! ```
//!
//! ## 요청 스코프 해석
//!
//! [`RequestScope::resolve`]는 싱글톤 → 스코프 캐시 → 팩토리 순으로 찾습니다.
//! 팩토리 실행 중 같은 타입을 다시 요청하면 [`RegistryError::CircularDependency`]를
//! 반환합니다.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::core::errors::AppError;
use crate::utils::display_terminal::{
    print_boxed_title, print_registry_summary, print_step_complete, print_step_start,
    print_sub_task,
};

type AnyInstance = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&RequestScope) -> Result<AnyInstance, RegistryError> + Send + Sync>;

/// 컴포넌트 등록 버킷. 선언 순서가 곧 등록 순서입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Contexts,
    DomainHandlers,
    DataHandlers,
    DataServiceHandlers,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Contexts,
        Bucket::DomainHandlers,
        Bucket::DataHandlers,
        Bucket::DataServiceHandlers,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Contexts => "Contexts",
            Bucket::DomainHandlers => "Domain Handlers",
            Bucket::DataHandlers => "Data Handlers",
            Bucket::DataServiceHandlers => "Data Service Handlers",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("No component registered for `{0}`")]
    NotRegistered(&'static str),

    #[error("Circular dependency detected while resolving `{0}`")]
    CircularDependency(&'static str),

    #[error("Registered component does not match requested type `{0}`")]
    TypeMismatch(&'static str),

    #[error("Failed to construct `{name}`: {reason}")]
    Construction { name: &'static str, reason: String },
}

/// 컴파일 타임 자동 등록 정보
///
/// `inventory`로 수집되며 [`RegistryBuilder::discover`]에서 버킷 순서로 적용됩니다.
pub struct ComponentRegistration {
    pub bucket: Bucket,
    pub name: &'static str,
    pub register: fn(&mut RegistryBuilder),
}

inventory::collect!(ComponentRegistration);

/// 버킷, 이름 순으로 정렬된 등록 목록 (첫 접근 시 한 번 구성)
static REGISTRATIONS: Lazy<Vec<&'static ComponentRegistration>> = Lazy::new(|| {
    let mut registrations: Vec<_> = inventory::iter::<ComponentRegistration>().collect();
    registrations.sort_by_key(|registration| (registration.bucket, registration.name));
    registrations
});

struct ScopedDescriptor {
    bucket: Bucket,
    name: &'static str,
    factory: Factory,
}

struct SingletonEntry {
    name: &'static str,
    instance: AnyInstance,
}

/// 등록된 컴포넌트 한 줄 요약
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestEntry {
    pub bucket: Option<Bucket>,
    pub name: &'static str,
}

#[derive(Default)]
pub struct RegistryBuilder {
    singletons: HashMap<TypeId, SingletonEntry>,
    scoped: HashMap<TypeId, ScopedDescriptor>,
    manifest: Vec<ManifestEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 애플리케이션 싱글톤을 등록합니다. 같은 타입을 다시 등록하면 교체됩니다.
    pub fn singleton<T: Send + Sync + 'static>(&mut self, instance: Arc<T>) -> &mut Self {
        let name = short_type_name::<T>();
        if self
            .singletons
            .insert(TypeId::of::<T>(), SingletonEntry { name, instance })
            .is_none()
        {
            self.manifest.push(ManifestEntry { bucket: None, name });
        }
        self
    }

    /// 요청 스코프 컴포넌트 팩토리를 등록합니다.
    pub fn scoped<T, F>(&mut self, bucket: Bucket, name: &'static str, factory: F) -> &mut Self
    where
        T: Send + Sync + 'static,
        F: Fn(&RequestScope) -> Result<Arc<T>, RegistryError> + Send + Sync + 'static,
    {
        let factory: Factory =
            Arc::new(move |scope| factory(scope).map(|instance| instance as AnyInstance));
        let previous = self.scoped.insert(
            TypeId::of::<T>(),
            ScopedDescriptor {
                bucket,
                name,
                factory,
            },
        );
        if previous.is_none() {
            self.manifest.push(ManifestEntry {
                bucket: Some(bucket),
                name,
            });
        }
        self
    }

    /// `inventory`로 수집된 모든 컴포넌트를 버킷 순서대로 등록합니다.
    pub fn discover(&mut self) -> &mut Self {
        for registration in REGISTRATIONS.iter() {
            log::debug!(
                "컴포넌트 등록: [{}] {}",
                registration.bucket.label(),
                registration.name
            );
            (registration.register)(self);
        }
        self
    }

    pub fn build(self) -> ServiceRegistry {
        ServiceRegistry {
            singletons: self.singletons,
            scoped: self.scoped,
            manifest: self.manifest,
        }
    }
}

/// 구성이 끝난 불변 DI 컨테이너
pub struct ServiceRegistry {
    singletons: HashMap<TypeId, SingletonEntry>,
    scoped: HashMap<TypeId, ScopedDescriptor>,
    manifest: Vec<ManifestEntry>,
}

impl ServiceRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// 싱글톤을 가져옵니다. 스코프 컴포넌트는 [`RequestScope`]로 해석해야 합니다.
    pub fn get<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let entry = self
            .singletons
            .get(&TypeId::of::<T>())
            .ok_or(RegistryError::NotRegistered(std::any::type_name::<T>()))?;
        downcast::<T>(entry.instance.clone())
    }

    pub fn manifest(&self) -> &[ManifestEntry] {
        &self.manifest
    }

    /// 등록 현황을 터미널에 출력합니다.
    pub fn print_summary(&self) {
        print_boxed_title("🔄 SERVICE REGISTRY");

        let singletons: Vec<_> = self.singletons.values().map(|entry| entry.name).collect();
        print_step_start(1, "Singletons");
        for name in &singletons {
            print_sub_task(name, "✓ Ready");
        }
        print_step_complete(1, "Singletons registered", singletons.len());

        let mut counts = Vec::new();
        for (index, bucket) in Bucket::ALL.iter().enumerate() {
            let step = index as u8 + 2;
            let mut names: Vec<_> = self
                .scoped
                .values()
                .filter(|descriptor| descriptor.bucket == *bucket)
                .map(|descriptor| descriptor.name)
                .collect();
            names.sort_unstable();

            print_step_start(step, bucket.label());
            for name in &names {
                print_sub_task(name, "per request");
            }
            print_step_complete(step, bucket.label(), names.len());
            counts.push((bucket.label(), names.len()));
        }

        print_registry_summary(singletons.len(), &counts);
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("manifest", &self.manifest)
            .finish()
    }
}

/// 요청 하나의 스코프 컴포넌트 캐시
///
/// actix 워커 스레드 안에서만 사용되므로 내부 가변성에 `RefCell`을 씁니다.
pub struct RequestScope {
    registry: Arc<ServiceRegistry>,
    instances: RefCell<HashMap<TypeId, AnyInstance>>,
    resolving: RefCell<HashSet<TypeId>>,
}

impl RequestScope {
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self {
            registry,
            instances: RefCell::new(HashMap::new()),
            resolving: RefCell::new(HashSet::new()),
        }
    }

    pub fn registry(&self) -> &Arc<ServiceRegistry> {
        &self.registry
    }

    /// 싱글톤 또는 스코프 컴포넌트를 해석합니다.
    pub fn resolve<T: Send + Sync + 'static>(&self) -> Result<Arc<T>, RegistryError> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(entry) = self.registry.singletons.get(&type_id) {
            return downcast::<T>(entry.instance.clone());
        }

        let cached = self.instances.borrow().get(&type_id).cloned();
        if let Some(instance) = cached {
            return downcast::<T>(instance);
        }

        let descriptor = self
            .registry
            .scoped
            .get(&type_id)
            .ok_or(RegistryError::NotRegistered(type_name))?;

        if !self.resolving.borrow_mut().insert(type_id) {
            log::error!("❌ 순환 의존성 감지: {}", descriptor.name);
            return Err(RegistryError::CircularDependency(type_name));
        }
        let created = (descriptor.factory)(self);
        self.resolving.borrow_mut().remove(&type_id);

        let instance = created?;
        self.instances.borrow_mut().insert(type_id, instance.clone());
        downcast::<T>(instance)
    }

    /// 이 요청에서 이미 생성된 스코프 컴포넌트 수
    pub fn resolved_count(&self) -> usize {
        self.instances.borrow().len()
    }

    /// 요청 확장 영역에 보관된 스코프를 가져오거나 새로 만듭니다.
    pub fn from_request(req: &HttpRequest) -> Result<Rc<RequestScope>, AppError> {
        let existing = req.extensions().get::<Rc<RequestScope>>().cloned();
        if let Some(scope) = existing {
            return Ok(scope);
        }

        let registry = req
            .app_data::<web::Data<ServiceRegistry>>()
            .ok_or_else(|| {
                AppError::DependencyError("ServiceRegistry가 등록되지 않았습니다".to_string())
            })?
            .clone()
            .into_inner();

        let scope = Rc::new(RequestScope::new(registry));
        req.extensions_mut().insert(scope.clone());
        Ok(scope)
    }
}

/// 요청 스코프에서 컴포넌트를 해석하는 추출자
///
/// ```rust,ignore
/// async fn list(handler: Inject<ProductHandler>) -> AppResult<impl Responder> {
///     handler.handle(ListProducts { .. }).await
/// }
/// ```
pub struct Inject<T>(pub Arc<T>);

impl<T> std::ops::Deref for Inject<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T: Send + Sync + 'static> FromRequest for Inject<T> {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            RequestScope::from_request(req)
                .and_then(|scope| scope.resolve::<T>().map(Inject).map_err(AppError::from)),
        )
    }
}

fn downcast<T: Send + Sync + 'static>(instance: AnyInstance) -> Result<Arc<T>, RegistryError> {
    instance
        .downcast::<T>()
        .map_err(|_| RegistryError::TypeMismatch(std::any::type_name::<T>()))
}

/// `std::any::type_name`에서 모듈 경로를 제거합니다.
///
/// `api_starter_backend::db::Database` → `Database`
fn short_type_name<T>() -> &'static str {
    let type_name = std::any::type_name::<T>();
    match type_name.find('<') {
        Some(_) => type_name,
        None => type_name.rsplit("::").next().unwrap_or(type_name),
    }
}
