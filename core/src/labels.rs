use std::fmt;

/// Canonical measurement fields, in the order the station table lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Timestamp,
    Rain,
    WindSpeed,
    WindDirection,
    Temperature,
    Humidity,
    Pressure,
}

/// Table headers as published by the station page, paired with their field.
const LABELS: [(&str, Field); 7] = [
    ("Data", Field::Timestamp),
    ("Chuva(mm)", Field::Rain),
    ("Vel.VT(m/s)", Field::WindSpeed),
    ("Dir.VT(o)", Field::WindDirection),
    ("Temp(oC)", Field::Temperature),
    ("Umid.Rel.(%)", Field::Humidity),
    ("Pressão(mb)", Field::Pressure),
];

/// Headers are compared on this many leading characters only.
const LABEL_PREFIX: usize = 4;

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Timestamp,
        Field::Rain,
        Field::WindSpeed,
        Field::WindDirection,
        Field::Temperature,
        Field::Humidity,
        Field::Pressure,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Timestamp => "timestamp",
            Field::Rain => "rain",
            Field::WindSpeed => "wind_speed",
            Field::WindDirection => "wind_direction",
            Field::Temperature => "temperature",
            Field::Humidity => "humidity",
            Field::Pressure => "pressure",
        }
    }

    /// Inclusive physical plausibility bounds.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            // a bit more than 3000 years of seconds
            Field::Timestamp => (0.0, 1e11),
            Field::Rain => (0.0, 2000.0),
            Field::WindSpeed => (0.0, 113.0),
            Field::WindDirection => (0.0, 360.0),
            Field::Temperature => (-94.0, 56.7),
            Field::Humidity => (0.0, 100.0),
            Field::Pressure => (0.0, 1083.8),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn prefix(label: &str) -> &str {
    match label.char_indices().nth(LABEL_PREFIX) {
        Some((end, _)) => &label[..end],
        None => label,
    }
}

/// Maps a raw column header to its field; `None` drops the column.
pub fn map_label(header: &str) -> Option<Field> {
    let wanted = prefix(header);
    LABELS
        .iter()
        .find(|(known, _)| prefix(known) == wanted)
        .map(|(_, field)| *field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_label_matches_known_headers() {
        for (header, field) in LABELS {
            assert_eq!(map_label(header), Some(field));
        }
    }

    #[test]
    fn map_label_only_looks_at_prefix() {
        assert_eq!(map_label("Data/Hora"), Some(Field::Timestamp));
        assert_eq!(map_label("Umid. Rel."), Some(Field::Humidity));
        assert_eq!(map_label("Pres"), Some(Field::Pressure));
    }

    #[test]
    fn map_label_prefix_counts_characters_not_bytes() {
        assert_eq!(prefix("Pressão(mb)"), "Pres");
        assert_eq!(prefix("Ação"), "Ação");
    }

    #[test]
    fn map_label_drops_unknown_and_short_headers() {
        assert_eq!(map_label("Rajada(m/s)"), None);
        assert_eq!(map_label("Dat"), None);
        assert_eq!(map_label(""), None);
        assert_eq!(map_label("data"), None);
    }
}
