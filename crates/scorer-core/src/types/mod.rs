//! 기본 수치 타입.

pub mod decimal;

pub use decimal::*;
