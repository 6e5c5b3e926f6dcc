use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of offered subjects. The course dropdowns (form and filter)
/// only ever present these five values; the column itself stays plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Course {
    Ingles,
    Espanhol,
    Informatica,
    Profissionalizante,
    Robotica,
}

impl Course {
    pub const ALL: [Course; 5] = [
        Course::Ingles,
        Course::Espanhol,
        Course::Informatica,
        Course::Profissionalizante,
        Course::Robotica,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Course::Ingles => "Inglês",
            Course::Espanhol => "Espanhol",
            Course::Informatica => "Informática",
            Course::Profissionalizante => "Profissionalizante",
            Course::Robotica => "Robótica",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Course {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value = raw.trim();
        Course::ALL
            .into_iter()
            .find(|course| course.as_str() == value)
            .ok_or_else(|| CoreError::UnknownCourse(raw.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::Course;
    use std::str::FromStr;

    #[test]
    fn course_round_trips_through_display() {
        for course in Course::ALL {
            assert_eq!(Course::from_str(course.as_str()).unwrap(), course);
        }
    }

    #[test]
    fn course_rejects_unknown_labels() {
        assert!(Course::from_str("Culinária").is_err());
        assert!(Course::from_str("").is_err());
    }
}
