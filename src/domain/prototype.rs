/// Types that can serve as a template for a new, independent instance.
///
/// A prototype does not build the copy itself. It describes the copy as a
/// construction request (the [`Draft`](Prototype::Draft)), which then goes
/// through the same construction path as any other new instance. This keeps
/// every side effect of construction (such as registering with an author)
/// identical for originals and copies.
///
/// Which fields are carried over, shared or reset is up to each implementor.
pub trait Prototype {
    /// The construction request describing the copy.
    type Draft;

    /// Describes a copy of `self` under this type's copy policy.
    fn prototype(&self) -> Self::Draft;
}
