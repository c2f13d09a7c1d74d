//! Utility helpers / 工具辅助
//!
//! Error-wrapping macros shared by the storage backends.
//! 存储后端共享的错误包装宏。

pub mod error_macros;
