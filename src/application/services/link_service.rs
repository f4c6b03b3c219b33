//! Link creation and retrieval service.

use std::sync::Arc;

use axum::http::HeaderValue;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{is_well_formed, short_code};

/// Longest URL accepted for shortening.
pub const MAX_URL_LENGTH: usize = 8192;

/// Service for creating and retrieving shortened links.
///
/// # Deduplication
///
/// Codes are derived from the URL, so resubmitting a URL always yields the
/// same code. The service first looks the URL up and returns the existing row
/// if there is one. Otherwise it performs an atomic insert-if-absent; a writer
/// that loses a race against a concurrent insert of the same URL re-reads and
/// returns the winner's row.
///
/// # Collisions
///
/// Truncated digests can collide. When the derived code already belongs to a
/// different URL the request fails with [`AppError::Conflict`] instead of
/// silently aliasing the two URLs.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Shortens a URL, returning the stored link.
    ///
    /// `owner_id` is recorded only when this call creates the row. If the URL
    /// was already shortened (by anyone) the existing link is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is empty, too long, or
    /// contains bytes that cannot appear in a `Location` header.
    /// Returns [`AppError::Conflict`] on a short code collision.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn shorten(
        &self,
        original_url: &str,
        owner_id: Option<&str>,
    ) -> Result<Link, AppError> {
        if original_url.trim().is_empty() {
            return Err(AppError::bad_request(
                "URL must not be empty",
                json!({ "field": "url" }),
            ));
        }

        if original_url.len() > MAX_URL_LENGTH {
            return Err(AppError::bad_request(
                "URL is too long",
                json!({
                    "max_length": MAX_URL_LENGTH,
                    "provided_length": original_url.len(),
                }),
            ));
        }

        // Stored URLs are replayed verbatim as the redirect `Location`.
        if HeaderValue::from_bytes(original_url.as_bytes()).is_err() {
            return Err(AppError::bad_request(
                "URL contains characters not allowed in a redirect",
                json!({ "field": "url" }),
            ));
        }

        if let Some(existing) = self
            .repository
            .find_by_original_url(original_url)
            .await?
        {
            debug!(code = %existing.short_code, "URL already shortened");
            return Ok(existing);
        }

        let code = short_code(original_url);

        let new_link = NewLink {
            short_code: code.clone(),
            original_url: original_url.to_string(),
            owner_id: owner_id.map(str::to_string),
        };

        if let Some(created) = self.repository.insert_if_absent(new_link).await? {
            info!(code = %created.short_code, owner_id = ?created.owner_id, "Link created");
            return Ok(created);
        }

        // Insert lost to an existing row: either a concurrent writer stored the
        // same URL, or the code belongs to a different URL.
        match self.repository.find_by_code(&code).await? {
            Some(existing) if existing.original_url == original_url => {
                debug!(code = %code, "Concurrent insert of the same URL");
                Ok(existing)
            }
            Some(_) => {
                warn!(code = %code, "Short code collision between distinct URLs");
                Err(AppError::conflict(
                    "Short code collision",
                    json!({ "code": code }),
                ))
            }
            None => self
                .repository
                .find_by_original_url(original_url)
                .await?
                .ok_or_else(|| {
                    AppError::internal(
                        "Link insert conflicted but no row was found",
                        json!({ "code": code }),
                    )
                }),
        }
    }

    /// Retrieves a link by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_link_by_code(&self, code: &str) -> Result<Link, AppError> {
        let not_found = || AppError::not_found("Short link not found", json!({ "code": code }));

        if !is_well_formed(code) {
            return Err(not_found());
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(not_found)
    }

    /// Lists links created by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Link>, AppError> {
        self.repository.list_by_owner(owner_id).await
    }
}
