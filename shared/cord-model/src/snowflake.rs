//! Snowflake identifiers and the creation time encoded in them.
//!
//! Layout of the 64 bits, high to low:
//! - 42 bits: milliseconds since [`EPOCH_MS`] (2015-01-01T00:00:00Z)
//! - 5 bits: internal worker id
//! - 5 bits: internal process id
//! - 12 bits: per-process increment

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::Error;

/// 2015-01-01T00:00:00Z as Unix milliseconds.
pub const EPOCH_MS: i64 = 1_420_070_400_000;

/// Right shift that leaves only the timestamp bits.
pub const TIMESTAMP_SHIFT: u32 = 22;

const MAX_TIMESTAMP_MS: u64 = (1 << (64 - TIMESTAMP_SHIFT)) - 1;
const WORKER_MASK: u64 = 0x3E_0000;
const PROCESS_MASK: u64 = 0x1_F000;
const INCREMENT_MASK: u64 = 0xFFF;

/// Creation time of the entity with identifier `id`.
///
/// Defined for every `u64`; identifiers below `1 << 22` decode to the epoch
/// itself.
///
/// # Examples
///
/// ```
/// use cord_model::decode_identifier_timestamp;
///
/// let created = decode_identifier_timestamp(175_928_847_299_117_063);
/// assert_eq!(created.to_rfc3339(), "2016-04-30T11:18:25.796+00:00");
/// ```
#[must_use]
pub fn decode_identifier_timestamp(id: u64) -> DateTime<Utc> {
    // At most 2^42 - 1 ms past the epoch, far inside the i64 and chrono ranges.
    let unix_ms = EPOCH_MS + (id >> TIMESTAMP_SHIFT) as i64;
    DateTime::<Utc>::UNIX_EPOCH + TimeDelta::milliseconds(unix_ms)
}

/// Unique identifier assigned by the platform when an entity is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Snowflake(u64);

impl Snowflake {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Milliseconds since [`EPOCH_MS`].
    #[must_use]
    pub const fn timestamp_ms(self) -> u64 {
        self.0 >> TIMESTAMP_SHIFT
    }

    #[must_use]
    pub fn created_at(self) -> DateTime<Utc> {
        decode_identifier_timestamp(self.0)
    }

    #[must_use]
    pub const fn worker_id(self) -> u8 {
        ((self.0 & WORKER_MASK) >> 17) as u8
    }

    #[must_use]
    pub const fn process_id(self) -> u8 {
        ((self.0 & PROCESS_MASK) >> 12) as u8
    }

    #[must_use]
    pub const fn increment(self) -> u16 {
        (self.0 & INCREMENT_MASK) as u16
    }

    /// Smallest identifier that could have been issued at `at`.
    ///
    /// Used as a pagination bound ("messages after this time"). Returns `None`
    /// for instants before the epoch or past the 42-bit timestamp range.
    /// Sub-millisecond precision is dropped.
    #[must_use]
    pub fn from_datetime(at: DateTime<Utc>) -> Option<Self> {
        let elapsed = u64::try_from(at.timestamp_millis() - EPOCH_MS).ok()?;
        (elapsed <= MAX_TIMESTAMP_MS).then_some(Self(elapsed << TIMESTAMP_SHIFT))
    }
}

/// An entity addressed by a [`Snowflake`].
///
/// Implementors only supply the id; the creation time is derived from it on
/// every call.
pub trait Identifiable {
    fn id(&self) -> Snowflake;

    fn created_at(&self) -> DateTime<Utc> {
        self.id().created_at()
    }
}

impl Identifiable for Snowflake {
    fn id(&self) -> Snowflake {
        *self
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for u64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::fmt::Display for Snowflake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self).map_err(|source| Error::InvalidSnowflake {
            input: s.to_owned(),
            source,
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Snowflake {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::serde_util::serialize_u64(self, self.0, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Snowflake {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        crate::serde_util::deserialize_u64(deserializer, "a snowflake").map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_zero_is_epoch() {
        assert_eq!(decode_identifier_timestamp(0), epoch());
        assert_eq!(epoch().timestamp_millis(), EPOCH_MS);
    }

    #[test]
    fn test_low_bits_ignored() {
        assert_eq!(decode_identifier_timestamp((1 << 22) - 1), epoch());
        assert_eq!(
            decode_identifier_timestamp((5 << 22) | 0x3F_FFFF),
            decode_identifier_timestamp(5 << 22)
        );
    }

    #[test]
    fn test_shifted_milliseconds() {
        for ms in [0_u64, 1, 1000, (1 << 41) - 1] {
            let expected = epoch() + TimeDelta::milliseconds(ms as i64);
            assert_eq!(decode_identifier_timestamp(ms << 22), expected, "ms = {ms}");
        }
    }

    #[test]
    fn test_max_identifier_decodes() {
        let latest = decode_identifier_timestamp(u64::MAX);
        assert_eq!(
            latest,
            epoch() + TimeDelta::milliseconds(MAX_TIMESTAMP_MS as i64)
        );
    }

    #[test]
    fn test_known_identifier() {
        let id = Snowflake::new(175_928_847_299_117_063);
        assert_eq!(id.timestamp_ms(), 41_944_705_796);
        assert_eq!(id.created_at().timestamp_millis(), 1_462_015_105_796);
        assert_eq!(id.worker_id(), 1);
        assert_eq!(id.process_id(), 0);
        assert_eq!(id.increment(), 7);
    }

    #[test]
    fn test_components_use_their_own_bits() {
        let id = Snowflake::new((31 << 17) | (17 << 12) | 4095);
        assert_eq!(id.worker_id(), 31);
        assert_eq!(id.process_id(), 17);
        assert_eq!(id.increment(), 4095);
        assert_eq!(id.timestamp_ms(), 0);
    }

    #[test]
    fn test_from_datetime_inverts_created_at() {
        let id = Snowflake::new(175_928_847_299_117_063);
        let floor = Snowflake::from_datetime(id.created_at()).unwrap();

        assert_eq!(floor.timestamp_ms(), id.timestamp_ms());
        assert_eq!(floor.get() & 0x3F_FFFF, 0);
        assert!(floor <= id);
    }

    #[test]
    fn test_from_datetime_bounds() {
        assert_eq!(Snowflake::from_datetime(epoch()), Some(Snowflake::new(0)));
        assert_eq!(
            Snowflake::from_datetime(epoch() - TimeDelta::milliseconds(1)),
            None
        );

        let last = epoch() + TimeDelta::milliseconds(MAX_TIMESTAMP_MS as i64);
        assert!(Snowflake::from_datetime(last).is_some());
        assert_eq!(
            Snowflake::from_datetime(last + TimeDelta::milliseconds(1)),
            None
        );
    }

    #[test]
    fn test_ordering_follows_creation_time() {
        let earlier = Snowflake::new(1 << 22);
        let later = Snowflake::new(2 << 22);
        assert!(earlier < later);
        assert!(earlier.created_at() < later.created_at());
    }

    #[test]
    fn test_parse_and_display() {
        let id: Snowflake = "80351110224678912".parse().unwrap();
        assert_eq!(id.get(), 80_351_110_224_678_912);
        assert_eq!(id.to_string(), "80351110224678912");
    }

    #[test]
    fn test_parse_rejects_non_decimal() {
        let err = "0x1f".parse::<Snowflake>().unwrap_err();
        assert!(matches!(err, Error::InvalidSnowflake { ref input, .. } if input == "0x1f"));
        assert!("-1".parse::<Snowflake>().is_err());
        assert!("".parse::<Snowflake>().is_err());
    }

    #[test]
    fn test_identifiable_on_snowflake() {
        let id = Snowflake::new(1000 << 22);
        assert_eq!(Identifiable::created_at(&id), epoch() + TimeDelta::seconds(1));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_string_and_integer() {
        let id = Snowflake::new(80_351_110_224_678_912);
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"80351110224678912\"");

        let from_str: Snowflake = serde_json::from_str("\"80351110224678912\"").unwrap();
        let from_int: Snowflake = serde_json::from_str("80351110224678912").unwrap();
        assert_eq!(from_str, id);
        assert_eq!(from_int, id);

        assert!(serde_json::from_str::<Snowflake>("\"abc\"").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_binary_format_uses_integer() {
        let id = Snowflake::new(80_351_110_224_678_912);
        let bytes = postcard::to_allocvec(&id).unwrap();

        assert_eq!(postcard::from_bytes::<u64>(&bytes).unwrap(), id.get());
        assert_eq!(postcard::from_bytes::<Snowflake>(&bytes).unwrap(), id);
    }
}
