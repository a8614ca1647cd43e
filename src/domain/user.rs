/// Profile persisted after a successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UserProfile {
    /// Creates a new UserProfile instance.
    ///
    /// # Arguments
    /// * `first_name` - Given name
    /// * `last_name` - Family name
    /// * `email` - Contact email address
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}
