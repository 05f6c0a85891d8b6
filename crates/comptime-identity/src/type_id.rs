// crates/comptime-identity/src/type_id.rs
//
// TypeId: packed type handle (table index + flags) with reserved builtin indices.

use smallvec::SmallVec;

/// Handle for a type in the shared type table.
///
/// The low 24 bits index the table's symbol list; the high 8 bits carry
/// [`TypeFlag`]s. Two ids with the same index but different flags denote
/// the same symbol wrapped differently (e.g. `T` vs `?T`).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct TypeId(u32);

/// Modifier bits carried alongside the table index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum TypeFlag {
    /// Optional / nilable wrapper (`?T`)
    Option,
    /// Result wrapper (`!T`)
    Result,
    /// The type is (or contains) an unsubstituted generic parameter
    Generic,
}

impl TypeFlag {
    const fn mask(self) -> u32 {
        match self {
            TypeFlag::Option => 1 << 24,
            TypeFlag::Result => 1 << 25,
            TypeFlag::Generic => 1 << 26,
        }
    }
}

const INDEX_MASK: u32 = 0x00ff_ffff;
const FLAGS_MASK: u32 = !INDEX_MASK;

impl TypeId {
    // ========================================================================
    // Reserved indices, pre-registered by every type table
    // ========================================================================

    /// The void/unknown sentinel. Must be index 0 so `Default` yields it.
    pub const VOID: TypeId = TypeId(0);

    pub const BOOL: TypeId = TypeId(1);

    pub const I8: TypeId = TypeId(2);
    pub const I16: TypeId = TypeId(3);
    pub const I32: TypeId = TypeId(4);
    pub const I64: TypeId = TypeId(5);

    pub const U8: TypeId = TypeId(6);
    pub const U16: TypeId = TypeId(7);
    pub const U32: TypeId = TypeId(8);
    pub const U64: TypeId = TypeId(9);

    pub const F32: TypeId = TypeId(10);
    pub const F64: TypeId = TypeId(11);

    pub const STRING: TypeId = TypeId(12);

    /// First index handed out for user-registered types.
    pub const FIRST_DYNAMIC: u32 = 13;

    /// Create a flag-less id for a table index.
    ///
    /// Indices above 24 bits are truncated; tables never grow that large.
    pub const fn from_index(index: u32) -> Self {
        TypeId(index & INDEX_MASK)
    }

    /// Table index with all flags stripped.
    #[inline]
    pub const fn idx(self) -> u32 {
        self.0 & INDEX_MASK
    }

    /// Same flags, different table index.
    #[inline]
    pub const fn with_index(self, index: u32) -> Self {
        TypeId((self.0 & FLAGS_MASK) | (index & INDEX_MASK))
    }

    #[inline]
    pub const fn has_flag(self, flag: TypeFlag) -> bool {
        self.0 & flag.mask() != 0
    }

    #[inline]
    pub const fn set_flag(self, flag: TypeFlag) -> Self {
        TypeId(self.0 | flag.mask())
    }

    #[inline]
    pub const fn clear_flag(self, flag: TypeFlag) -> Self {
        TypeId(self.0 & !flag.mask())
    }

    /// Copy the wrapper flags (`Option`, `Result`) of `other` onto `self`.
    #[inline]
    pub const fn with_wrappers_of(self, other: TypeId) -> Self {
        let wrappers = TypeFlag::Option.mask() | TypeFlag::Result.mask();
        TypeId(self.0 | (other.0 & wrappers))
    }

    /// Index and flags are both zero.
    #[inline]
    pub const fn is_void(self) -> bool {
        self.0 == Self::VOID.0
    }

    #[inline]
    pub const fn is_option(self) -> bool {
        self.has_flag(TypeFlag::Option)
    }

    #[inline]
    pub const fn is_result(self) -> bool {
        self.has_flag(TypeFlag::Result)
    }

    #[inline]
    pub const fn is_generic(self) -> bool {
        self.has_flag(TypeFlag::Generic)
    }

    /// Builtin scalar (bool, numbers, string), ignoring flags.
    #[inline]
    pub const fn is_builtin(self) -> bool {
        let idx = self.idx();
        idx >= Self::BOOL.0 && idx <= Self::STRING.0
    }

    /// Check if this is any integer type (ignoring flags)
    #[inline]
    pub const fn is_integer(self) -> bool {
        let idx = self.idx();
        idx >= Self::I8.0 && idx <= Self::U64.0
    }
}

/// SmallVec for short type lists (generic arguments, smart-cast history)
pub type TypeIdVec = SmallVec<[TypeId; 4]>;
