//! 공통 유틸리티 함수 모듈
//! 
//! - [`display_terminal`] - 시작 로그용 터미널 출력 포맷팅 함수들
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::display_terminal::print_boxed_title;
//!
//! print_boxed_title("API Starter Backend");
//! ```

pub mod display_terminal;
