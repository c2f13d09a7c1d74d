/// Error handling macros for reducing boilerplate code in storage backends
/// 错误处理宏，用于减少存储后端中的样板代码

/// Macro for handling spawn_blocking task execution with automatic error handling
/// 处理 spawn_blocking 任务执行的宏，自动处理错误
#[macro_export]
macro_rules! spawn_blocking_task {
    ($task:expr) => {
        tokio::task::spawn_blocking($task)
            .await
            .map_err(|e| $crate::addresses::error::AddressError::Storage(
                format!("Task join error: {}", e)
            ))?
    };
}

/// Macro for handling Sled database errors
/// 处理 Sled 数据库错误的宏
#[macro_export]
macro_rules! handle_sled_error {
    ($operation:expr, $op_name:expr) => {
        $operation.map_err(|e| $crate::addresses::error::AddressError::Storage(
            format!("Sled {} error: {}", $op_name, e)
        ))
    };
}

/// Macro for handling RocksDB errors
/// 处理 RocksDB 错误的宏
#[macro_export]
macro_rules! handle_rocksdb_error {
    ($operation:expr, $op_name:expr) => {
        $operation.map_err(|e| $crate::addresses::error::AddressError::Storage(
            format!("RocksDB {} error: {}", $op_name, e)
        ))
    };
}

#[cfg(test)]
mod tests {
    use crate::addresses::error::{AddressError, AddressResult};

    async fn run_blocking(fail: bool) -> AddressResult<u32> {
        spawn_blocking_task!(move || {
            if fail {
                Err(AddressError::Storage("inner failure".to_string()))
            } else {
                Ok(7)
            }
        })
    }

    #[tokio::test]
    async fn test_spawn_blocking_task_passes_result_through() {
        assert_eq!(run_blocking(false).await.unwrap(), 7);
        match run_blocking(true).await {
            Err(AddressError::Storage(msg)) => assert_eq!(msg, "inner failure"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_handle_sled_error_wraps_message() {
        let op: Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"));
        let err = handle_sled_error!(op, "put").unwrap_err();
        assert_eq!(err.to_string(), "Storage error: Sled put error: disk gone");
    }
}
