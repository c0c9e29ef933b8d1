use std::fmt;

use crate::{EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE, ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE};

/// A single record of the one hard-coded table.
///
/// Length bounds on `username` and `email` are enforced at prepare time; a
/// `Row` handed to the codec always fits its fixed-width columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: i32,
    pub username: String,
    pub email: String,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

/// Packs a row into its fixed-width slot layout: little-endian id, then the
/// username and email regions with unused bytes left zero.
pub fn serialize_row(row: &Row) -> [u8; ROW_SIZE] {
    let mut buf = [0u8; ROW_SIZE];
    buf[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&row.id.to_le_bytes());
    let username = row.username.as_bytes();
    buf[USERNAME_OFFSET..USERNAME_OFFSET + username.len()].copy_from_slice(username);
    let email = row.email.as_bytes();
    buf[EMAIL_OFFSET..EMAIL_OFFSET + email.len()].copy_from_slice(email);
    buf
}

/// Reconstructs a row from its slot. Text columns end at the first NUL byte
/// or the column boundary, whichever comes first.
pub fn deserialize_row(buf: &[u8; ROW_SIZE]) -> Row {
    let mut id_bytes = [0u8; ID_SIZE];
    id_bytes.copy_from_slice(&buf[ID_OFFSET..ID_OFFSET + ID_SIZE]);

    Row {
        id: i32::from_le_bytes(id_bytes),
        username: read_column(&buf[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
        email: read_column(&buf[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
    }
}

fn read_column(region: &[u8]) -> String {
    let end = region.iter().position(|&b| b == 0).unwrap_or(region.len());
    String::from_utf8_lossy(&region[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn sample_row() -> Row {
        Row {
            id: 1,
            username: String::from("user1"),
            email: String::from("person1@example.com"),
        }
    }

    #[test]
    fn it_round_trips_a_row() {
        let row = sample_row();
        assert_eq!(deserialize_row(&serialize_row(&row)), row);
    }

    #[test]
    fn it_round_trips_maximum_length_columns() {
        let row = Row {
            id: i32::MAX,
            username: "a".repeat(USERNAME_SIZE),
            email: "b".repeat(EMAIL_SIZE),
        };
        assert_eq!(deserialize_row(&serialize_row(&row)), row);
    }

    #[test]
    fn it_zero_pads_short_columns() {
        let buf = serialize_row(&sample_row());
        assert!(buf[USERNAME_OFFSET + 5..USERNAME_OFFSET + USERNAME_SIZE]
            .iter()
            .all(|&b| b == 0));
        assert!(buf[EMAIL_OFFSET + 19..].iter().all(|&b| b == 0));
    }

    #[test]
    fn it_formats_a_row_as_a_tuple() {
        assert_eq!(sample_row().to_string(), "(1, user1, person1@example.com)");
    }

    proptest! {
        #[test]
        fn it_round_trips_any_valid_row(
            id in 1..=i32::MAX,
            username in "[a-zA-Z0-9._-]{0,32}",
            email in "[a-zA-Z0-9._@-]{0,255}",
        ) {
            let row = Row { id, username, email };
            let decoded = deserialize_row(&serialize_row(&row));
            prop_assert_eq!(decoded, row);
        }
    }
}
