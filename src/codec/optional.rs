/// Wire value to canonical state: a null becomes the type's zero value.
pub fn from_wire<T: Default>(wire: Option<T>) -> T {
    wire.unwrap_or_default()
}

/// Wire value to a populated state attribute.
///
/// After a read every attribute is set, so null comes back as a concrete
/// zero value rather than as "unset".
pub fn populate<T: Default>(wire: Option<T>) -> Option<T> {
    Some(from_wire(wire))
}

/// State attribute to wire value.
///
/// An unset attribute is left off the wire. A set one is sent verbatim,
/// including `""` and `false`.
pub fn to_wire<T: Clone>(attribute: &Option<T>) -> Option<T> {
    attribute.clone()
}
