/// Async counterpart to the standard library's `TryFrom<T>` trait.
///
/// Used where building a value requires I/O, such as walking a directory
/// into a tree:
///
/// ```rust,ignore
/// let tree = SchemaNode::async_try_from(Path::new("target/debug")).await?;
/// ```
pub trait AsyncTryFrom<T>: Sized {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `T` to `Self`.
    async fn async_try_from(value: T) -> Result<Self, Self::Error>;
}

/// Async counterpart to `TryInto<T>`.
pub trait AsyncTryInto<T> {
    /// The error type that can occur during conversion.
    type Error;

    /// Performs the fallible asynchronous conversion from `Self` to `T`.
    async fn async_try_into(self) -> Result<T, Self::Error>;
}

/// Blanket implementation for `AsyncTryInto<U>` when `U` implements `AsyncTryFrom<T>`.
impl<T, U> AsyncTryInto<U> for T
where
    U: AsyncTryFrom<T>,
{
    type Error = U::Error;

    async fn async_try_into(self) -> Result<U, Self::Error> {
        U::async_try_from(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EntryCount(usize);

    impl AsyncTryFrom<&str> for EntryCount {
        type Error = std::num::ParseIntError;

        async fn async_try_from(value: &str) -> Result<Self, Self::Error> {
            Ok(EntryCount(value.parse()?))
        }
    }

    #[test]
    fn test_async_try_from_success() {
        futures::executor::block_on(async {
            let count = EntryCount::async_try_from("42").await.unwrap();
            assert_eq!(count.0, 42);
        });
    }

    #[test]
    fn test_async_try_from_failure() {
        futures::executor::block_on(async {
            let result = EntryCount::async_try_from("many").await;
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_async_try_into() {
        futures::executor::block_on(async {
            let count: Result<EntryCount, _> = "7".async_try_into().await;
            assert_eq!(count.unwrap().0, 7);
        });
    }
}
