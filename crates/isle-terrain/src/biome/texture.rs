//! Texture assignment: maps each [`BiomeCategory`] to a texture handle.
//!
//! Handles are opaque indices into whatever atlas the renderer owns; this
//! module only guarantees that each category resolves to exactly one of them.

use hashbrown::HashMap;

use super::BiomeCategory;

/// Opaque renderer-side texture index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Errors from texture registration and lookup.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TextureError {
    /// The category already has a texture.
    #[error("texture already assigned for {0}")]
    Duplicate(BiomeCategory),
    /// No texture has been registered for the category.
    #[error("no texture assigned for {0}")]
    Missing(BiomeCategory),
}

/// Category → texture lookup, built once at startup.
#[derive(Debug, Default)]
pub struct TextureAssignment {
    names: Vec<String>,
    by_category: HashMap<BiomeCategory, TextureHandle>,
}

impl TextureAssignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assignment with one texture per category, named after the category.
    pub fn standard() -> Self {
        Self {
            names: BiomeCategory::ALL
                .iter()
                .map(|c| c.name().to_string())
                .collect(),
            by_category: BiomeCategory::ALL
                .iter()
                .map(|&c| (c, TextureHandle(c.index() as u32)))
                .collect(),
        }
    }

    /// Assign a named texture to a category and return its handle.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::Duplicate`] if the category is already assigned.
    pub fn register(
        &mut self,
        category: BiomeCategory,
        name: impl Into<String>,
    ) -> Result<TextureHandle, TextureError> {
        if self.by_category.contains_key(&category) {
            return Err(TextureError::Duplicate(category));
        }
        let handle = TextureHandle(self.names.len() as u32);
        self.names.push(name.into());
        self.by_category.insert(category, handle);
        Ok(handle)
    }

    /// Handle for a category, if assigned.
    pub fn handle(&self, category: BiomeCategory) -> Option<TextureHandle> {
        self.by_category.get(&category).copied()
    }

    /// Handle for a category.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::Missing`] if the category has no texture.
    pub fn resolve(&self, category: BiomeCategory) -> Result<TextureHandle, TextureError> {
        self.handle(category).ok_or(TextureError::Missing(category))
    }

    /// Texture name behind a handle.
    pub fn name(&self, handle: TextureHandle) -> Option<&str> {
        self.names.get(handle.0 as usize).map(String::as_str)
    }

    /// Number of assigned textures.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
