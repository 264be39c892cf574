//! 터미널 출력 포맷팅 유틸리티
//! 
//! 애플리케이션 시작 과정(레지스트리 구성, 서버 바인딩)에서 사용되는 터미널 출력 함수들을 제공합니다.
//! 박스 형태의 제목, 진행 단계 표시, 완료 상태 등을 시각적으로 표현합니다.

/// 박스 형태로 둘러싸인 제목을 출력합니다
/// 
/// Unicode 박스 문자를 사용하여 시각적으로 눈에 띄는 제목을 출력합니다.
/// 텍스트는 자동으로 중앙 정렬됩니다.
/// 
/// # Arguments
/// 
/// * `title` - 출력할 제목 문자열
/// 
/// # Examples
/// 
/// ```rust,ignore
/// use crate::utils::display_terminal::print_boxed_title;
/// 
/// print_boxed_title("System Started");
/// ```
/// 
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║                  System Started                  ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    // 고정 너비 50칸 사용 (박스 내부 콘텐츠)
    let content_width = 50;
    let border = "═".repeat(content_width);

    println!("╔{}╗", border);
    println!("║{:^49}║", title);  // ^49로 49칸 중앙 정렬
    println!("╚{}╝", border);
}

/// 진행 단계 시작을 표시합니다
/// 
/// 특정 단계가 시작되었음을 화살표 기호와 함께 출력합니다.
/// 
/// # Arguments
/// 
/// * `step` - 단계 번호 (1부터 시작)
/// * `description` - 단계 설명
/// 
/// # Examples
/// 
/// ```rust,ignore
/// use crate::utils::display_terminal::print_step_start;
/// 
/// print_step_start(1, "Initializing database connection");
/// ```
/// 
/// Output:
/// ```text
/// → Step 1: Initializing database connection
/// ```
pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

/// 진행 단계 완료를 표시합니다
/// 
/// 특정 단계가 완료되었음을 체크 표시와 함께 출력하고,
/// 처리된 항목 수를 함께 표시합니다.
/// 
/// # Arguments
/// 
/// * `step` - 완료된 단계 번호
/// * `description` - 단계 설명
/// * `count` - 처리된 항목 수
/// 
/// # Examples
/// 
/// ```rust,ignore
/// use crate::utils::display_terminal::print_step_complete;
/// 
/// print_step_complete(1, "Singletons registered", 3);
/// ```
/// 
/// Output:
/// ```text
/// ✓ Step 1: Singletons registered (3 items)
/// ```
pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

/// 서브 작업의 상태를 표시합니다
/// 
/// 들여쓰기된 트리 구조로 하위 작업의 진행 상황을 출력합니다.
/// 
/// # Arguments
/// 
/// * `name` - 서브 작업의 이름
/// * `status` - 현재 상태 또는 결과
/// 
/// # Examples
/// 
/// ```rust,ignore
/// use crate::utils::display_terminal::print_sub_task;
/// 
/// print_sub_task("ProductRepository", "per request");
/// print_sub_task("Database", "Connected");
/// ```
/// 
/// Output:
/// ```text
///    ├─ ProductRepository: per request
///    ├─ Database: Connected
/// ```
pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

/// 레지스트리 등록 요약을 출력합니다
/// 
/// 싱글톤 수와 버킷별 요청 스코프 컴포넌트 수를 시각적으로 강조된 형태로
/// 출력합니다.
/// 
/// # Arguments
/// 
/// * `singletons` - 등록된 싱글톤 수
/// * `buckets` - (버킷 이름, 컴포넌트 수) 목록. 등록 순서대로 출력됩니다.
/// 
/// # Examples
/// 
/// ```rust,ignore
/// use crate::utils::display_terminal::print_registry_summary;
/// 
/// print_registry_summary(3, &[("Contexts", 1), ("Data Handlers", 2)]);
/// ```
/// 
/// Output:
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║          🎉 SERVICE REGISTRY INITIALIZED         ║
/// ╚══════════════════════════════════════════════════╝
///    📦 Singletons: 3
///    🔧 Contexts: 1
///    🔧 Data Handlers: 2
///    🚀 Total Components: 6
/// ```
pub fn print_registry_summary(singletons: usize, buckets: &[(&str, usize)]) {
    let scoped: usize = buckets.iter().map(|(_, count)| count).sum();
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Singletons: {}", singletons);
    for (label, count) in buckets {
        println!("   🔧 {}: {}", label, count);
    }
    println!("   🚀 Total Components: {}", singletons + scoped);
    println!();
}
