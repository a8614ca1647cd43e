use crate::validator::ValidationError;

/// A single form input and the message from its last validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormField {
    pub value: String,
    pub error: Option<String>,
}

impl FormField {
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            error: None,
        }
    }

    /// Stores `value` and records the outcome of `validate` against it.
    pub fn update<F>(&mut self, value: String, validate: F)
    where
        F: for<'a> Fn(&'a str) -> Result<&'a str, ValidationError>,
    {
        self.error = validate(&value).err().map(|e| e.to_string());
        self.value = value;
    }

    pub fn is_filled(&self) -> bool {
        !self.value.is_empty()
    }
}

/// The three inputs collected during onboarding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub first_name: FormField,
    pub last_name: FormField,
    pub email: FormField,
}

impl RegistrationForm {
    /// Valid iff every field is filled and none carries an error.
    pub fn is_valid(&self) -> bool {
        let fields = [&self.first_name, &self.last_name, &self.email];
        fields.iter().all(|f| f.is_filled() && f.error.is_none())
    }
}
