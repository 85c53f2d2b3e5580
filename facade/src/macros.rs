//! Public macros for declaring facades.

/// Declares a concrete facade type for a container accessor.
///
/// # Examples
///
/// ```
/// use fibre_facade::{facade, FacadeAccessor};
///
/// facade!(
///   /// The application cache.
///   pub Cache => "cache"
/// );
///
/// assert_eq!(Cache::ACCESSOR, "cache");
/// assert_eq!(Cache::facade().facade_accessor().as_deref(), Some("cache"));
/// ```
#[macro_export]
macro_rules! facade {
  ($(#[$meta:meta])* $vis:vis $name:ident => $accessor:expr) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, Default)]
    $vis struct $name;

    impl $crate::FacadeAccessor for $name {
      const ACCESSOR: &'static str = $accessor;
    }
  };
}
