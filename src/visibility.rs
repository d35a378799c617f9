use crate::store::StoreSnapshot;

/// An error is shown once the field has been touched or a submit was attempted,
/// so pristine fields never flash validation messages.
pub fn error_visible(snapshot: &StoreSnapshot, field_name: &str) -> bool {
    snapshot.errors.contains_key(field_name)
        && (snapshot.touched.contains_key(field_name) || snapshot.submit_count > 0)
}
