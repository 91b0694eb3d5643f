//! Names and limits shared across the crate

/// Root single-element container
pub const COLLECTION: &str = "Collection";
pub const LIST: &str = "List";
pub const SET: &str = "Set";
pub const ARRAY_LIST: &str = "ArrayList";
pub const LINKED_LIST: &str = "LinkedList";
pub const HASH_SET: &str = "HashSet";

/// Root keyed container
pub const MAP: &str = "Map";
pub const HASH_MAP: &str = "HashMap";
pub const TREE_MAP: &str = "TreeMap";

/// Optional wrapper
pub const OPTIONAL: &str = "Optional";

// Callable intrinsics, rejected when they appear as member types
pub const FUNCTION: &str = "Function";
pub const SUPPLIER: &str = "Supplier";
pub const CONSUMER: &str = "Consumer";
pub const RUNNABLE: &str = "Runnable";

/// Accessor name prefixes
pub const GETTER_PREFIX: &str = "get";
pub const BOOLEAN_GETTER_PREFIX: &str = "is";
pub const SETTER_PREFIX: &str = "set";

/// First numeric suffix used when two definitions share a simple name
pub const FIRST_COLLISION_SUFFIX: usize = 2;

/// Upper bound on supertype hops when resolving container arguments
pub const MAX_SUPERTYPE_DEPTH: usize = 64;

/// Sigil that marks a type variable in type expressions
pub const TYPE_VARIABLE_SIGIL: char = '$';
