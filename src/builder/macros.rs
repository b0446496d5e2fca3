//! Macros for ergonomic state identity declaration.

/// Generate a [`StateId`](crate::core::StateId) enum.
///
/// The generated enum derives the traits `StateId` requires, names each
/// variant after itself, and exposes every variant through an `ALL` constant.
///
/// # Example
///
/// ```
/// use stance::core::StateId;
/// use stance::state_ids;
///
/// state_ids! {
///     pub enum PlayerState {
///         Idle,
///         Walk,
///         Jump,
///     }
/// }
///
/// assert_eq!(PlayerState::Jump.name(), "Jump");
/// assert_eq!(PlayerState::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! state_ids {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $name {
            /// Every identity, in declaration order.
            #[allow(dead_code)]
            pub const ALL: &'static [$name] = &[$($name::$variant),*];
        }

        impl $crate::core::StateId for $name {
            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
