use uuid::Uuid;

/// Rows addressed by a UUID primary key. Every repository trait is keyed on it.
pub trait Identifiable {
    fn get_id(&self) -> Uuid;
}
