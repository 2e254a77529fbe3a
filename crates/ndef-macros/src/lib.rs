/// Implement `Default` by forwarding to a zero-argument constructor, `new` unless named
#[macro_export]
macro_rules! impl_default_for {
    ($name:ident) => {
        $crate::impl_default_for!($name, new);
    };

    ($name:ident, $constructor:ident) => {
        impl Default for $name {
            fn default() -> Self {
                Self::$constructor()
            }
        }
    };
}
