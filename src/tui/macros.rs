//! Shorthand for laying out views.
//!
//! `col!` stacks children vertically and `row!` places them side by side.
//! Each child is `element => constraint`; a bare element takes `Fill(1)`.
//!
//! ```ignore
//! use_constraints!();
//! row![
//!     sidebar => Length(26),
//!     content => Fill(1),
//! ]
//! ```

/// One empty line
#[macro_export]
macro_rules! spacer {
    () => {
        $crate::tui::Element::text("")
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __linear {
    ($builder:expr; ) => { $builder.build() };
    ($builder:expr; $child:expr => $constraint:expr $(, $($rest:tt)*)?) => {
        $crate::__linear!($builder.add($child, $constraint); $($($rest)*)?)
    };
    ($builder:expr; $child:expr $(, $($rest:tt)*)?) => {
        $crate::__linear!($builder.add($child, $crate::tui::LayoutConstraint::Fill(1)); $($($rest)*)?)
    };
}

#[macro_export]
macro_rules! col {
    [ $($body:tt)* ] => {
        $crate::__linear!($crate::tui::element::LinearBuilder::column(); $($body)*)
    };
}

#[macro_export]
macro_rules! row {
    [ $($body:tt)* ] => {
        $crate::__linear!($crate::tui::element::LinearBuilder::row(); $($body)*)
    };
}

/// Bring `Length`, `Min` and `Fill` into scope for the layout macros
#[macro_export]
macro_rules! use_constraints {
    () => {
        #[allow(unused_imports)]
        use $crate::tui::LayoutConstraint::{Fill, Length, Min};
    };
}
