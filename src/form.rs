use crate::models::StudentRow;
use crate::validation::Field;

/// The add-student form: one value and one error indicator per [`Field`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentForm {
    values: [String; 4],
    errors: [bool; 4],
}

impl StudentForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Whether the field's error indicator is showing.
    pub fn shows_error(&self, field: Field) -> bool {
        self.errors[field.index()]
    }

    /// The fields whose error indicator is showing, in form order.
    pub fn visible_errors(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.shows_error(*field))
            .collect()
    }

    /// Replaces the field's value and revalidates it.
    pub fn input(&mut self, field: Field, value: &str) -> bool {
        self.values[field.index()] = value.to_string();
        self.validate(field)
    }

    /// Revalidates the field as focus leaves it.
    pub fn blur(&mut self, field: Field) -> bool {
        self.validate(field)
    }

    /// Checks the field's current value and shows or hides its error indicator.
    pub fn validate(&mut self, field: Field) -> bool {
        let ok = field.is_valid(self.value(field));
        self.errors[field.index()] = !ok;
        ok
    }

    /// Validates every field. If all of them pass, builds a row with every flag cleared and
    /// resets the form; otherwise returns the invalid fields and leaves the form as it is.
    pub fn submit(&mut self, course: &str) -> Result<StudentRow, Vec<Field>> {
        let invalid: Vec<Field> = Field::ALL
            .into_iter()
            .filter(|&field| !self.validate(field))
            .collect();

        if !invalid.is_empty() {
            return Err(invalid);
        }

        let row = StudentRow::new(
            self.value(Field::StudentId).trim(),
            self.value(Field::LastName).trim(),
            self.value(Field::FirstName).trim(),
            course,
        );
        self.reset();
        Ok(row)
    }

    /// Clears every value and hides every error indicator.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
