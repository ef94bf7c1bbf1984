//! Splitting a raw personal name into its components.

/// Honorifics dropped from the front of a name.
const TITLES: [&str; 14] = [
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "er", "shri", "smt", "sir", "rev", "sri", "kumari",
];

/// Generational and professional suffixes dropped from the end of a name.
const SUFFIXES: [&str; 12] = [
    "jr", "sr", "ii", "iii", "iv", "v", "phd", "md", "esq", "mba", "cpa", "dds",
];

/// Lower-case particles that bind to the following surname.
const PARTICLES: [&str; 18] = [
    "van", "von", "de", "der", "den", "del", "della", "di", "da", "das", "dos", "do", "du", "la",
    "le", "los", "bin", "al",
];

fn normalized(token: &str) -> String {
    token.trim_end_matches('.').to_lowercase()
}

fn is_title(token: &str) -> bool {
    TITLES.contains(&normalized(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&normalized(token).as_str())
}

fn is_particle(token: &str) -> bool {
    PARTICLES.contains(&token)
}

/// A personal name split into title, first, middle, last and suffix.
///
/// Understands `"First Middle Last"` and `"Last, First Middle"`, drops
/// leading honorifics and trailing suffixes, and keeps lower-case particles
/// with the surname (`"Ludwig van Beethoven"` has last name
/// `"van Beethoven"`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HumanName {
    pub title: String,
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

impl HumanName {
    /// Parse a raw name string.
    pub fn parse(raw: &str) -> Self {
        let mut name = HumanName::default();

        let (main, after_comma) = match raw.split_once(',') {
            Some((before, after)) => (before, Some(after)),
            None => (raw, None),
        };

        let mut tokens: Vec<&str> = main.split_whitespace().collect();

        match after_comma {
            // "John Smith, Jr."
            Some(rest) if !rest.trim().is_empty() && rest.split_whitespace().all(is_suffix) => {
                name.suffix = rest.split_whitespace().collect::<Vec<_>>().join(" ");
            }
            // "Smith, John A."
            Some(rest) if !rest.trim().is_empty() => {
                let surname = tokens.join(" ");
                let mut given: Vec<&str> = rest.split_whitespace().collect();
                name.title = take_titles(&mut given);
                name.suffix = take_suffixes(&mut given);
                if let Some((first, middle)) = given.split_first() {
                    name.first = first.to_string();
                    name.middle = middle.join(" ");
                }
                name.last = surname;
                return name;
            }
            _ => {}
        }

        name.title = take_titles(&mut tokens);
        let suffix = take_suffixes(&mut tokens);
        if !suffix.is_empty() {
            name.suffix = if name.suffix.is_empty() {
                suffix
            } else {
                format!("{} {}", suffix, name.suffix)
            };
        }

        match tokens.len() {
            0 => {}
            1 => name.first = tokens[0].to_string(),
            len => {
                name.first = tokens[0].to_string();

                let mut last_start = len - 1;
                while last_start > 1 && is_particle(tokens[last_start - 1]) {
                    last_start -= 1;
                }

                name.middle = tokens[1..last_start].join(" ");
                name.last = tokens[last_start..].join(" ");
            }
        }

        name
    }

    /// `"<first> <last>"`, or whichever of the two is present.
    pub fn first_last(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_string()
    }
}

/// Remove leading honorifics, keeping at least one token.
fn take_titles(tokens: &mut Vec<&str>) -> String {
    let mut count = 0;
    while count + 1 < tokens.len() && is_title(tokens[count]) {
        count += 1;
    }
    tokens.drain(..count).collect::<Vec<_>>().join(" ")
}

/// Remove trailing suffixes, keeping at least two tokens.
fn take_suffixes(tokens: &mut Vec<&str>) -> String {
    let mut keep = tokens.len();
    while keep > 2 && is_suffix(tokens[keep - 1]) {
        keep -= 1;
    }
    tokens.drain(keep..).collect::<Vec<_>>().join(" ")
}
