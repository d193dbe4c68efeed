//! 注解声明与批量注册宏

/// 为类型声明注册注解
///
/// 生成 [`ComponentAnnotations`] 实现，未列出的字段取默认值。
///
/// [`ComponentAnnotations`]: crate::ComponentAnnotations
///
/// ```rust
/// use definition_readers::component_annotations;
///
/// #[derive(Debug)]
/// struct UserService;
///
/// component_annotations!(UserService {
///     primary: true,
///     description: Some("用户服务".to_string()),
/// });
/// ```
#[macro_export]
macro_rules! component_annotations {
    ($ty:ty { $($field:ident : $value:expr),* $(,)? }) => {
        impl $crate::ComponentAnnotations for $ty {
            fn annotations() -> $crate::AnnotatedMetadata {
                $crate::AnnotatedMetadata {
                    $($field: $value,)*
                    ..Default::default()
                }
            }
        }
    };
}

/// 批量注册注解类型
///
/// 按列出顺序逐个调用 [`AnnotatedDefinitionReader::register`]，
/// 第一个错误即返回。
///
/// [`AnnotatedDefinitionReader::register`]: crate::AnnotatedDefinitionReader::register
#[macro_export]
macro_rules! register_components {
    ($reader:expr, $($ty:ty),+ $(,)?) => {{
        let reader = &$reader;
        (|| -> $crate::StoreResult<()> {
            $(reader.register::<$ty>()?;)+
            Ok(())
        })()
    }};
}
