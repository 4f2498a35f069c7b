//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**; they are defined entirely by their
//! attribute values. `Money` and a disbursement plan are value objects, an
//! account is not.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. The bounds keep them cheap to pass around, comparable in
/// tests and printable in logs.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct NoteCount {
///     denomination: u32,
///     count: u32,
/// }
///
/// impl ValueObject for NoteCount {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
