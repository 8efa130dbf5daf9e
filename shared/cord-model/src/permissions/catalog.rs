//! The permission catalog.
//!
//! Every permission is declared exactly once in the table at the bottom of
//! this file. The table generates both the [`Permission`] enumeration and the
//! flag constants of [`PermissionSet`], so adding a permission is a one-line
//! change. The `bitflags` type behind `PermissionSet` stays private to this
//! module. Bit indexes are explicit enum discriminants: reusing an index is a
//! compile error.
//!
//! Bit positions are part of the wire format. Append new permissions at the
//! next free index; never renumber or reuse an existing one.

use bitflags::bitflags;

use crate::error::Error;

macro_rules! permission_catalog {
    (
        $(
            $(#[doc = $doc:literal])*
            $variant:ident = $bit:literal, $flag:ident, $name:literal;
        )+
    ) => {
        /// A single grantable capability.
        ///
        /// The discriminant is the permission's bit index inside a
        /// [`PermissionSet`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum Permission {
            $(
                $(#[doc = $doc])*
                $variant = $bit,
            )+
        }

        impl Permission {
            /// Every permission in the catalog, in bit order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Stable snake_case name of the permission.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }

            /// Looks up a permission by its snake_case name.
            #[must_use]
            pub fn from_name(name: &str) -> Option<Self> {
                match name {
                    $($name => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        bitflags! {
            #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            struct RawFlags: u64 {
                $(const $flag = 1 << $bit;)+
            }
        }

        /// A set of permissions stored as a 64-bit bitfield.
        ///
        /// Bits that do not belong to a catalog permission are never set. The
        /// only way in from an integer is [`PermissionSet::from_raw`], which
        /// masks them out, and there are no in-place mutators that take raw
        /// bits:
        ///
        /// ```compile_fail
        /// let _ = cord_model::PermissionSet::from_bits_retain(1 << 63);
        /// ```
        ///
        /// ```compile_fail
        /// let mut set = cord_model::PermissionSet::NONE;
        /// set.insert(cord_model::PermissionSet::SEND_MESSAGES);
        /// ```
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct PermissionSet(RawFlags);

        impl PermissionSet {
            $(
                $(#[doc = $doc])*
                pub const $flag: Self = Self(RawFlags::$flag);
            )+
        }
    };
}

impl Permission {
    /// Bit index of this permission.
    #[must_use]
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask of this permission.
    #[must_use]
    pub const fn mask(self) -> u64 {
        1 << self.bit()
    }
}

impl PermissionSet {
    /// No permissions.
    pub const NONE: Self = Self(RawFlags::empty());

    /// Every permission in the catalog.
    pub const ALL: Self = Self(RawFlags::all());

    /// Create a set from a stored or transmitted integer.
    ///
    /// Bits with no catalog permission are dropped without error. Values
    /// written by a newer catalog therefore load cleanly into an older one.
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(RawFlags::from_bits_truncate(value))
    }

    /// The integer form used for storage and transmission.
    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0.bits()
    }
}

impl std::fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PermissionSet(")?;
        for (i, (name, _)) in self.0.iter_names().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            f.write_str(name)?;
        }
        f.write_str(")")
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Permission {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownPermission(s.to_owned()))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Permission {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Permission {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        Self::from_name(&name).ok_or_else(|| {
            serde::de::Error::custom(format_args!("unknown permission `{name}`"))
        })
    }
}

// Catalog sanity checks, evaluated at compile time.
const _: () = {
    let mut seen: u64 = 0;
    let mut i = 0;
    while i < Permission::ALL.len() {
        let mask = Permission::ALL[i].mask();
        assert!(seen & mask == 0, "permission listed twice in Permission::ALL");
        seen |= mask;
        i += 1;
    }
    assert!(seen == PermissionSet::ALL.to_raw());
};

permission_catalog! {
    /// Create channel invites.
    CreateInstantInvite = 0, CREATE_INSTANT_INVITE, "create_instant_invite";
    /// Kick members from the guild.
    KickMembers = 1, KICK_MEMBERS, "kick_members";
    /// Ban members from the guild.
    BanMembers = 2, BAN_MEMBERS, "ban_members";
    /// Implies every other permission and bypasses channel overwrites.
    Administrator = 3, ADMINISTRATOR, "administrator";
    /// Create, edit and delete channels.
    ManageChannels = 4, MANAGE_CHANNELS, "manage_channels";
    /// Edit guild settings.
    ManageGuild = 5, MANAGE_GUILD, "manage_guild";
    /// Add new reactions to messages.
    AddReactions = 6, ADD_REACTIONS, "add_reactions";
    /// Read the guild audit log.
    ViewAuditLog = 7, VIEW_AUDIT_LOG, "view_audit_log";
    /// Use priority speaker in voice channels.
    PrioritySpeaker = 8, PRIORITY_SPEAKER, "priority_speaker";
    /// Go live in voice channels.
    Stream = 9, STREAM, "stream";
    /// See a channel.
    ViewChannel = 10, VIEW_CHANNEL, "view_channel";
    SendMessages = 11, SEND_MESSAGES, "send_messages";
    SendTtsMessages = 12, SEND_TTS_MESSAGES, "send_tts_messages";
    /// Delete or pin other members' messages.
    ManageMessages = 13, MANAGE_MESSAGES, "manage_messages";
    EmbedLinks = 14, EMBED_LINKS, "embed_links";
    AttachFiles = 15, ATTACH_FILES, "attach_files";
    ReadMessageHistory = 16, READ_MESSAGE_HISTORY, "read_message_history";
    /// Mention `@everyone` and `@here`.
    MentionEveryone = 17, MENTION_EVERYONE, "mention_everyone";
    UseExternalEmojis = 18, USE_EXTERNAL_EMOJIS, "use_external_emojis";
    ViewGuildInsights = 19, VIEW_GUILD_INSIGHTS, "view_guild_insights";
    /// Join voice channels.
    Connect = 20, CONNECT, "connect";
    Speak = 21, SPEAK, "speak";
    MuteMembers = 22, MUTE_MEMBERS, "mute_members";
    DeafenMembers = 23, DEAFEN_MEMBERS, "deafen_members";
    /// Move members between voice channels.
    MoveMembers = 24, MOVE_MEMBERS, "move_members";
    /// Speak without push-to-talk.
    UseVoiceActivity = 25, USE_VOICE_ACTIVITY, "use_voice_activity";
    ChangeNickname = 26, CHANGE_NICKNAME, "change_nickname";
    ManageNicknames = 27, MANAGE_NICKNAMES, "manage_nicknames";
    /// Create and edit roles below the member's highest role.
    ManageRoles = 28, MANAGE_ROLES, "manage_roles";
    ManageWebhooks = 29, MANAGE_WEBHOOKS, "manage_webhooks";
    /// Edit custom emoji and stickers.
    ManageGuildExpressions = 30, MANAGE_GUILD_EXPRESSIONS, "manage_guild_expressions";
    UseApplicationCommands = 31, USE_APPLICATION_COMMANDS, "use_application_commands";
    /// Request to speak in stage channels.
    RequestToSpeak = 32, REQUEST_TO_SPEAK, "request_to_speak";
    ManageEvents = 33, MANAGE_EVENTS, "manage_events";
    ManageThreads = 34, MANAGE_THREADS, "manage_threads";
    CreatePublicThreads = 35, CREATE_PUBLIC_THREADS, "create_public_threads";
    CreatePrivateThreads = 36, CREATE_PRIVATE_THREADS, "create_private_threads";
    UseExternalStickers = 37, USE_EXTERNAL_STICKERS, "use_external_stickers";
    SendMessagesInThreads = 38, SEND_MESSAGES_IN_THREADS, "send_messages_in_threads";
    UseEmbeddedActivities = 39, USE_EMBEDDED_ACTIVITIES, "use_embedded_activities";
    /// Time out members.
    ModerateMembers = 40, MODERATE_MEMBERS, "moderate_members";
}
