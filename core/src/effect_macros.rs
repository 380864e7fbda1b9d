//! Declarative macros for ergonomic effect construction

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use ans_dashboard_core::async_effect;
///
/// async_effect! {
///     let result = api.get_estatisticas().await;
///     Some(OperadorasAction::EstatisticasLoaded { request, result })
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::Effect;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Loaded { value: i32 },
    }

    #[test]
    fn test_async_effect_macro() {
        let value = 42;
        let effect = async_effect! {
            Some(TestAction::Loaded { value })
        };

        let Effect::Future(fut) = effect else {
            unreachable!("async_effect! always builds Effect::Future");
        };
        assert_eq!(
            tokio_test::block_on(fut),
            Some(TestAction::Loaded { value: 42 })
        );
    }
}
