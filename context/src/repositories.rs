use gb_core::RepositoryModel;
use storage::{FileResolver, MetadataUpdate, Resolution};
use tracing::{debug, info, warn};

use crate::broker::ContextBroker;
use crate::error::BrokerError;

/// What `edit_repository` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Repository initialised (or re-initialised) and metadata written.
    Created,
    /// Metadata of an existing repository rewritten.
    Updated,
    /// Nothing to edit; nothing written.
    NotFound,
    /// Repository exists but is not exported; nothing written.
    NotEnabled
}

impl ContextBroker {
    /// Names of every served repository, sorted by path.
    ///
    /// # Errors
    ///
    /// `BrokerError::NotInitialized` before setup, or a storage error if the
    /// repositories folder cannot be walked.
    pub fn list_repository_names(&self) -> Result<Vec<String>, BrokerError> {
        let state = self.state()?;
        let names = state
            .resolver
            .list_names(state.config.nested_repositories)?;
        debug!(count = names.len(), "Listed repository names");
        Ok(names)
    }

    /// One model per served repository, in the order of
    /// [`ContextBroker::list_repository_names`].
    ///
    /// Entries that vanish or stop being exported between the listing and
    /// the open are skipped.
    pub fn list_repositories(&self) -> Result<Vec<RepositoryModel>, BrokerError> {
        let state = self.state()?;
        let names = state
            .resolver
            .list_names(state.config.nested_repositories)?;

        models_for(&state.resolver, names)
    }

    /// Resolves `name` to an open repository.
    ///
    /// The returned handle owns the repository and releases it on drop.
    pub fn get_repository(&self, name: &str) -> Result<Resolution, BrokerError> {
        let resolution = self.state()?.resolver.open(name)?;
        match &resolution {
            Resolution::Found(_) => debug!(repository = name, "Resolved repository"),
            Resolution::NotFound => debug!(repository = name, "Repository not found"),
            Resolution::NotEnabled => {
                info!(repository = name, "Repository exists but is not exported")
            }
        }
        Ok(resolution)
    }

    /// Creates a bare repository or edits an existing one, then writes the
    /// model's description, owner and feature flags in one batch.
    ///
    /// Editing a repository that cannot be resolved writes nothing and
    /// reports why.
    ///
    /// # Errors
    ///
    /// `RepositoryError::InvalidName` for unsafe names on create, and any
    /// git or metadata write failure.
    pub fn edit_repository(
        &self,
        model: &RepositoryModel,
        is_create: bool
    ) -> Result<EditOutcome, BrokerError> {
        let state = self.state()?;
        let name = model.name.as_str();

        let (handle, outcome) = if is_create {
            let handle = state.resolver.create_repository(name, true)?;
            info!(repository = name, "Created repository");
            (handle, EditOutcome::Created)
        } else {
            match state.resolver.open(name)? {
                Resolution::Found(handle) => (handle, EditOutcome::Updated),
                Resolution::NotFound => {
                    warn!(repository = name, "Cannot edit missing repository");
                    return Ok(EditOutcome::NotFound);
                }
                Resolution::NotEnabled => {
                    warn!(repository = name, "Cannot edit repository that is not exported");
                    return Ok(EditOutcome::NotEnabled);
                }
            }
        };

        handle.apply_metadata(&MetadataUpdate::from_model(model))?;
        debug!(repository = name, ?outcome, "Repository metadata written");
        Ok(outcome)
    }
}

/// Opens each of `names` and snapshots it. Names that no longer resolve are
/// skipped; hard storage errors abort.
fn models_for(
    resolver: &FileResolver,
    names: Vec<String>
) -> Result<Vec<RepositoryModel>, BrokerError> {
    let mut models = Vec::with_capacity(names.len());
    for name in names {
        match resolver.open(&name)? {
            Resolution::Found(handle) => models.push(handle.to_model()?),
            Resolution::NotFound => warn!(repository = %name, "Repository vanished while listing"),
            Resolution::NotEnabled => {
                warn!(repository = %name, "Repository stopped being exported while listing")
            }
        }
    }
    Ok(models)
}
