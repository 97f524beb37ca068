use crate::error::Result;
use codemint_core::{
    resolve_output_name, BatchId, BatchStore, CodeRegistry, GenerationRequest, Progress,
};
use codemint_generator::{Generation, Generator, Sampler};
use tracing::{info, warn};
use typed_builder::TypedBuilder;

/// Result of issuing one request.
#[derive(Debug, Clone)]
pub struct Issued {
    /// Size of the existing set the new codes were checked against.
    pub existing: usize,
    pub generation: Generation,
    /// Where the codes were persisted; `None` when nothing was generated.
    pub batch: Option<BatchId>,
}

/// Issues codes for one request at a time.
///
/// The service wraps a [`CodeRegistry`] and a [`BatchStore`] to handle:
/// - loading the existing set for the request's prefix
/// - bounded rejection sampling against it
/// - picking a batch name that does not overwrite earlier output
/// - persisting the batch
///
/// Registry and store may be the same backend, in which case every batch
/// becomes part of the corpus for later requests.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CodeService<R, S> {
    registry: R,
    store: S,
    #[builder(default)]
    sampler: Sampler,
}

impl<R: CodeRegistry, S: BatchStore> CodeService<R, S> {
    pub fn registry(&self) -> &R {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Loads, generates and, if at least one code came out, persists.
    ///
    /// A shortfall is not an error; compare `generation.len()` with the
    /// requested quantity. Only validation and storage failures are errors.
    pub fn issue<G: Generator + ?Sized>(
        &self,
        request: &GenerationRequest,
        generator: &mut G,
        progress: Option<&dyn Progress>,
    ) -> Result<Issued> {
        let prefix = request.prefix();
        let existing = self.registry.load(prefix);
        info!(prefix = %prefix, existing = existing.len(), "loaded existing codes");

        let generation = self.sampler.run(
            prefix,
            request.quantity(),
            &existing,
            generator,
            progress,
        )?;

        if generation.is_empty() {
            warn!(prefix = %prefix, "no new unique codes generated; nothing persisted");
            return Ok(Issued {
                existing: existing.len(),
                generation,
                batch: None,
            });
        }

        let name = resolve_output_name(prefix, &self.store)?;
        let batch = self.store.persist(&name, generation.codes())?;
        info!(
            prefix = %prefix,
            batch = %batch,
            generated = generation.len(),
            requested = generation.requested(),
            "issued codes"
        );

        Ok(Issued {
            existing: existing.len(),
            generation,
            batch: Some(batch),
        })
    }
}
