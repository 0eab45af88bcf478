//! Map configuration.

/// Configuration for creating and editing a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Name given to the depot when a new map is created.
    pub depot_name: String,

    /// Position of the depot in a new map.
    pub depot_position: (i32, i32),

    /// Weight used by [`GraphRepository::connect`](crate::GraphRepository::connect).
    pub default_path_weight: i32,

    /// Whether creating a map writes the depot record.
    pub seed_depot: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depot_name: "Pizzeria".to_string(),
            depot_position: (50, 50),
            default_path_weight: 1,
            seed_depot: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depot name.
    #[must_use]
    pub fn depot_name(mut self, name: impl Into<String>) -> Self {
        self.depot_name = name.into();
        self
    }

    /// Sets the depot position.
    #[must_use]
    pub const fn depot_position(mut self, x: i32, y: i32) -> Self {
        self.depot_position = (x, y);
        self
    }

    /// Sets the default path weight.
    #[must_use]
    pub const fn default_path_weight(mut self, weight: i32) -> Self {
        self.default_path_weight = weight;
        self
    }

    /// Sets whether a new map starts with the depot.
    ///
    /// Without it, the first house added takes identifier 0 and becomes the
    /// depot.
    #[must_use]
    pub const fn seed_depot(mut self, value: bool) -> Self {
        self.seed_depot = value;
        self
    }
}
