//! Rule-based address tagger.
//!
//! Tokens are labelled in three passes: the trailing city/state/ZIP, the
//! leading PO box or rural route and address number, then the street segment
//! and any occupancy that follows it. A label that ends up on two separate
//! runs of tokens is reported as [`TaggerError::RepeatedLabel`].

use super::lexicon::{self, is_one_of};
use super::{AddressComponents, AddressKind, Label, Tagger, TaggerError};
use std::ops::Range;

#[derive(Debug, Clone)]
struct Token {
    /// Token as written, outer punctuation removed
    text: String,
    /// Upper case with periods removed, used for matching
    key: String,
    comma_after: bool,
}

impl Token {
    fn starts_with_digit(&self) -> bool {
        self.key.chars().next().is_some_and(|c| c.is_ascii_digit())
    }

    fn is_word(&self) -> bool {
        self.key
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c == '\'' || c == '-')
            && self.key.chars().any(|c| c.is_ascii_alphabetic())
    }

    fn is_zip(&self) -> bool {
        let digits = |s: &str, n: usize| s.len() == n && s.chars().all(|c| c.is_ascii_digit());
        match self.key.split_once('-') {
            Some((head, tail)) => digits(head, 5) && digits(tail, 4),
            None => digits(&self.key, 5),
        }
    }

    fn is_fraction(&self) -> bool {
        match self.key.split_once('/') {
            Some((num, den)) => {
                !num.is_empty()
                    && !den.is_empty()
                    && num.chars().all(|c| c.is_ascii_digit())
                    && den.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }

    fn is(&self, list: &[&str]) -> bool {
        is_one_of(&self.key, list)
    }

    fn is_unit_marker(&self) -> bool {
        self.is(lexicon::OCCUPANCY_TYPES)
            || self.is(lexicon::SUBADDRESS_TYPES)
            || self.key.starts_with('#')
    }

    fn is_city_word(&self) -> bool {
        self.is_word()
            && !self.is(lexicon::STREET_TYPES)
            && !self.is(lexicon::DIRECTIONALS)
            && !self.is(lexicon::INTERSECTION_SEPARATORS)
            && !self.is_unit_marker()
            && !self.is_box_word()
    }

    fn is_box_word(&self) -> bool {
        matches!(self.key.as_str(), "BOX" | "POB" | "RR" | "HC" | "HCR")
    }
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();
    for raw in text.split_whitespace() {
        let comma_after = raw.ends_with(',');
        let trimmed = raw.trim_matches(|c: char| {
            matches!(c, ',' | '.' | ';' | ':' | '(' | ')' | '"' | '\'' | '*' | '-' | '_')
        });
        let meaningful =
            trimmed.chars().any(char::is_alphanumeric) || matches!(trimmed, "&" | "#" | "@");
        if !meaningful {
            if comma_after || raw.starts_with(',') {
                if let Some(last) = tokens.last_mut() {
                    last.comma_after = true;
                }
            }
            continue;
        }
        tokens.push(Token {
            text: trimmed.to_string(),
            key: trimmed.to_uppercase().replace('.', ""),
            comma_after,
        });
    }
    tokens
}

/// Length of the marker sequence starting at `start`, if any
fn match_marker(tokens: &[Token], start: usize, end: usize, markers: &[&[&str]]) -> Option<usize> {
    markers.iter().find_map(|marker| {
        let fits = start + marker.len() <= end
            && marker
                .iter()
                .zip(&tokens[start..])
                .all(|(word, token)| token.key == *word);
        fits.then_some(marker.len())
    })
}

/// Deterministic tagger for US voter-file addresses
#[derive(Debug, Clone, Default)]
pub struct RuleTagger;

impl RuleTagger {
    pub fn new() -> Self {
        Self
    }

    /// Label the trailing city, state and ZIP; returns where the body ends
    fn tag_trailer(&self, tokens: &[Token], labels: &mut [Option<Label>]) -> usize {
        let mut end = tokens.len();
        let mut found = false;

        if end >= 2 && tokens[end - 1].is_zip() {
            let before = &tokens[end - 2];
            let is_box_number = before.is_unit_marker()
                || before.is_box_word()
                || before.is(lexicon::PRE_TYPES);
            if !is_box_number {
                labels[end - 1] = Some(Label::ZipCode);
                end -= 1;
                found = true;
            }
        }

        if end >= 2
            && tokens[end - 1].is(lexicon::STATE_ABBREVIATIONS)
            && (found || tokens[end - 2].comma_after)
        {
            labels[end - 1] = Some(Label::StateName);
            end -= 1;
            found = true;
        }

        let comma = (0..end.saturating_sub(1)).rev().find(|&i| tokens[i].comma_after);
        let city = match comma {
            Some(i) => {
                let run = i + 1..end;
                let is_city = tokens[run.clone()]
                    .iter()
                    .all(|t| t.is_word() && !t.is_unit_marker() && !t.is_box_word());
                is_city.then_some(run)
            }
            None if found => {
                let mut start = end;
                while start > 0 && tokens[start - 1].is_city_word() {
                    start -= 1;
                }
                // A lone house number keeps the following word as its street
                if start == 1 && tokens[0].starts_with_digit() {
                    start += 1;
                }
                (start < end).then_some(start..end)
            }
            None => None,
        };

        if let Some(run) = city {
            for label in &mut labels[run.clone()] {
                *label = Some(Label::PlaceName);
            }
            end = run.start;
        }
        end
    }

    fn tag_body(&self, tokens: &[Token], end: usize, labels: &mut [Option<Label>]) {
        let separator = (1..end.saturating_sub(1))
            .find(|&i| tokens[i].is(lexicon::INTERSECTION_SEPARATORS));
        if let Some(sep) = separator {
            let start = self.tag_number(tokens, 0, sep, labels);
            self.tag_street(tokens, start..sep, labels);
            labels[sep] = Some(Label::IntersectionSeparator);
            self.tag_second_street(tokens, sep + 1..end, labels);
            return;
        }

        let mut i = 0;
        if let Some(n) = match_marker(tokens, i, end, lexicon::BOX_GROUP_MARKERS) {
            if i + n < end && tokens[i + n].starts_with_digit() {
                for label in &mut labels[i..i + n] {
                    *label = Some(Label::USPSBoxGroupType);
                }
                labels[i + n] = Some(Label::USPSBoxGroupID);
                i += n + 1;
            }
        }

        let mut boxed = false;
        if let Some(n) = match_marker(tokens, i, end, lexicon::BOX_MARKERS) {
            if i + n < end && tokens[i + n].key.chars().any(|c| c.is_ascii_digit()) {
                for label in &mut labels[i..i + n] {
                    *label = Some(Label::USPSBoxType);
                }
                labels[i + n] = Some(Label::USPSBoxID);
                i += n + 1;
                boxed = true;
            }
        }

        if !boxed && i == 0 {
            i = self.tag_number(tokens, i, end, labels);
        }

        let street_end = (i..end)
            .find(|&j| tokens[j].is_unit_marker())
            .unwrap_or(end);
        self.tag_street(tokens, i..street_end, labels);
        self.tag_units(tokens, street_end..end, labels);
    }

    /// Address number and fractional suffix; returns the next unlabelled index
    fn tag_number(
        &self,
        tokens: &[Token],
        mut i: usize,
        end: usize,
        labels: &mut [Option<Label>],
    ) -> usize {
        if i < end && tokens[i].starts_with_digit() {
            labels[i] = Some(Label::AddressNumber);
            i += 1;
            if i < end - 1 && tokens[i].is_fraction() {
                labels[i] = Some(Label::AddressNumberSuffix);
                i += 1;
            }
        }
        i
    }

    fn tag_street(&self, tokens: &[Token], range: Range<usize>, labels: &mut [Option<Label>]) {
        let (mut s, e) = (range.start, range.end);
        if s >= e {
            return;
        }

        if e - s >= 2 && tokens[s].is(lexicon::DIRECTIONALS) {
            labels[s] = Some(Label::StreetNamePreDirectional);
            s += 1;
        }
        if e - s >= 3
            && tokens[s].is(lexicon::PRE_MODIFIERS)
            && tokens[s + 1].is(lexicon::PRE_TYPES)
        {
            labels[s] = Some(Label::StreetNamePreModifier);
            s += 1;
        }
        if e - s >= 2 && tokens[s].is(lexicon::PRE_TYPES) {
            labels[s] = Some(Label::StreetNamePreType);
            s += 1;
        }

        let name_start = s;
        let street_type = (name_start + 1..e).find(|&j| tokens[j].is(lexicon::STREET_TYPES));

        match street_type {
            Some(t) => {
                for label in &mut labels[name_start..t] {
                    *label = Some(Label::StreetName);
                }
                labels[t] = Some(Label::StreetNamePostType);
                let mut j = t + 1;
                if j < e && tokens[j].is(lexicon::POST_MODIFIERS) {
                    labels[j] = Some(Label::StreetNamePostModifier);
                    j += 1;
                }
                if j < e && tokens[j].is(lexicon::DIRECTIONALS) {
                    labels[j] = Some(Label::StreetNamePostDirectional);
                    j += 1;
                }
                for (label, token) in labels[j..e].iter_mut().zip(&tokens[j..e]) {
                    *label = Some(if token.is_word() {
                        Label::PlaceName
                    } else {
                        Label::OccupancyIdentifier
                    });
                }
            }
            None => {
                let mut end = e;
                if end - name_start >= 2 && tokens[end - 1].is(lexicon::DIRECTIONALS) {
                    labels[end - 1] = Some(Label::StreetNamePostDirectional);
                    end -= 1;
                }
                if end - name_start >= 2 && tokens[end - 1].is(lexicon::POST_MODIFIERS) {
                    labels[end - 1] = Some(Label::StreetNamePostModifier);
                    end -= 1;
                }
                for label in &mut labels[name_start..end] {
                    *label = Some(Label::StreetName);
                }
            }
        }
    }

    fn tag_second_street(
        &self,
        tokens: &[Token],
        range: Range<usize>,
        labels: &mut [Option<Label>],
    ) {
        let (mut s, mut e) = (range.start, range.end);
        if e - s >= 2 && tokens[s].is(lexicon::DIRECTIONALS) {
            labels[s] = Some(Label::SecondStreetNamePreDirectional);
            s += 1;
        }
        if e - s >= 2 && tokens[e - 1].is(lexicon::DIRECTIONALS) {
            labels[e - 1] = Some(Label::SecondStreetNamePostDirectional);
            e -= 1;
        }
        if e - s >= 2 && tokens[e - 1].is(lexicon::STREET_TYPES) {
            labels[e - 1] = Some(Label::SecondStreetNamePostType);
            e -= 1;
        }
        for label in &mut labels[s..e] {
            *label = Some(Label::SecondStreetName);
        }
    }

    /// Occupancy and subaddress markers with their identifiers, plus any
    /// trailing words the trailer pass did not claim
    fn tag_units(&self, tokens: &[Token], range: Range<usize>, labels: &mut [Option<Label>]) {
        let end = range.end;
        let mut j = range.start;
        while j < end {
            let token = &tokens[j];
            let has_identifier = j + 1 < end && !tokens[j + 1].is_unit_marker();
            if token.key == "#" {
                labels[j] = Some(Label::OccupancyIdentifier);
                if has_identifier {
                    labels[j + 1] = Some(Label::OccupancyIdentifier);
                    j += 1;
                }
            } else if token.key.starts_with('#') {
                labels[j] = Some(Label::OccupancyIdentifier);
            } else if token.is(lexicon::OCCUPANCY_TYPES) {
                labels[j] = Some(Label::OccupancyType);
                if has_identifier {
                    labels[j + 1] = Some(Label::OccupancyIdentifier);
                    j += 1;
                }
            } else if token.is(lexicon::SUBADDRESS_TYPES) {
                labels[j] = Some(Label::SubaddressType);
                if has_identifier {
                    labels[j + 1] = Some(Label::SubaddressIdentifier);
                    j += 1;
                }
            } else if token.is_zip() {
                labels[j] = Some(Label::ZipCode);
            } else if token.is_word() {
                labels[j] = Some(Label::PlaceName);
            } else {
                labels[j] = Some(Label::OccupancyIdentifier);
            }
            j += 1;
        }
    }

    fn collect(
        &self,
        text: &str,
        tokens: &[Token],
        labels: &[Option<Label>],
    ) -> Result<AddressComponents, TaggerError> {
        let mut components = AddressComponents::new();
        let mut previous: Option<Label> = None;
        for (token, label) in tokens.iter().zip(labels) {
            let label = label.unwrap_or(Label::NotAddress);
            if previous != Some(label) && components.contains(label) {
                return Err(TaggerError::RepeatedLabel {
                    label,
                    text: text.to_string(),
                });
            }
            components.push(label, &token.text);
            previous = Some(label);
        }
        Ok(components)
    }
}

fn classify(components: &AddressComponents) -> AddressKind {
    if components.contains(Label::IntersectionSeparator) {
        AddressKind::Intersection
    } else if components.contains(Label::USPSBoxID) {
        AddressKind::PoBox
    } else if components.contains(Label::AddressNumber) || components.contains(Label::StreetName) {
        AddressKind::Street
    } else {
        AddressKind::Ambiguous
    }
}

impl Tagger for RuleTagger {
    fn tag(&self, text: &str) -> Result<(AddressComponents, AddressKind), TaggerError> {
        let tokens = tokenize(text);
        let mut labels = vec![None; tokens.len()];

        let body_end = self.tag_trailer(&tokens, &mut labels);
        self.tag_body(&tokens, body_end, &mut labels);

        let components = self.collect(text, &tokens, &labels)?;
        let kind = classify(&components);
        Ok((components, kind))
    }
}
