//! Identifier decoding and permission resolution through the public API.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use cord_model::permissions::{
    compute_base_permissions, compute_channel_permissions, GuildRole, OverwriteTarget,
    PermissionOverwrite,
};
use cord_model::{
    decode_identifier_timestamp, Identifiable, Permission, PermissionLevel, PermissionSet,
    Snowflake,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap()
}

/// A minimal entity composing the identifier capability.
struct Message {
    id: Snowflake,
    content: String,
}

impl Identifiable for Message {
    fn id(&self) -> Snowflake {
        self.id
    }
}

#[test]
fn test_epoch_boundary() {
    assert_eq!(decode_identifier_timestamp(0), epoch());
    for ms in [0_u64, 1, 1000, (1 << 41) - 1] {
        assert_eq!(
            decode_identifier_timestamp(ms << 22),
            epoch() + TimeDelta::milliseconds(ms as i64)
        );
    }
}

#[test]
fn test_decode_is_deterministic_and_monotonic() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..2_000 {
        let a: u64 = rng.gen();
        let b: u64 = rng.gen();
        assert_eq!(decode_identifier_timestamp(a), decode_identifier_timestamp(a));
        if a >> 22 <= b >> 22 {
            assert!(decode_identifier_timestamp(a) <= decode_identifier_timestamp(b));
        }
    }
}

#[test]
fn test_from_datetime_roundtrip_at_millisecond_precision() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2_000 {
        let ms = rng.gen_range(0..(1_u64 << 42));
        let at = epoch() + TimeDelta::milliseconds(ms as i64);
        let id = Snowflake::from_datetime(at).unwrap();
        assert_eq!(id.created_at(), at);
    }
}

#[test]
fn test_entity_created_at_is_derived_from_id() {
    let message = Message {
        id: Snowflake::new(175_928_847_299_117_063),
        content: "hello".to_string(),
    };
    assert_eq!(message.created_at().timestamp_millis(), 1_462_015_105_796);
    assert_eq!(message.content, "hello");
}

#[test]
fn test_roles_and_overwrites_end_to_end() {
    let guild_id = Snowflake::new(81_384_788_765_712_384);
    let owner_id = Snowflake::new(80_351_110_224_678_912);
    let user_id = Snowflake::new(175_928_847_299_117_063);
    let helper = GuildRole::new(
        Snowflake::new(41_771_983_423_143_937),
        "Helpers",
        PermissionSet::MANAGE_MESSAGES,
        1,
    );

    let base = compute_base_permissions(
        user_id,
        owner_id,
        PermissionSet::VIEW_CHANNEL | PermissionSet::SEND_MESSAGES,
        std::slice::from_ref(&helper),
    );

    let overwrites = [
        PermissionOverwrite::new(OverwriteTarget::Role(guild_id))
            .with_level(Permission::ViewChannel, PermissionLevel::Denied),
        PermissionOverwrite::new(OverwriteTarget::Role(helper.id))
            .with_level(Permission::ViewChannel, PermissionLevel::Allowed),
    ];

    let in_channel =
        compute_channel_permissions(base, guild_id, user_id, &[helper.id], &overwrites);
    assert!(in_channel.has_permission(Permission::ViewChannel));
    assert!(in_channel.has_permission(Permission::ManageMessages));

    let without_role = compute_channel_permissions(base, guild_id, user_id, &[], &overwrites);
    assert!(!without_role.has_permission(Permission::ViewChannel));
    assert!(helper.created_at() < user_id.created_at());
}
