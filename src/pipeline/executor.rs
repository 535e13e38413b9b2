use crate::pipeline::registry::ProcessorRegistry;
use crate::uploader::{OperationTable, Uploader};
use tracing::{debug, info, info_span, warn};
use uuid::Uuid;

/// Run the uploader type's declared processors against `uploader`.
pub fn run<U: Uploader>(uploader: &mut U) -> Result<(), U::Error> {
    run_with(U::processors(), U::operations(), uploader)
}

/// Run `registry` against `uploader`, resolving names through `table`.
///
/// Steps run in registry order. The first failing step ends the run and its
/// error is returned as is; later steps are skipped and earlier side effects
/// on `uploader` are kept.
pub fn run_with<U: Uploader>(
    registry: &ProcessorRegistry,
    table: &OperationTable<U>,
    uploader: &mut U,
) -> Result<(), U::Error> {
    let span = info_span!(
        "process",
        run_id = %Uuid::new_v4(),
        uploader = std::any::type_name::<U>()
    );
    let _enter = span.enter();

    if registry.is_empty() {
        debug!("no processors declared");
        return Ok(());
    }

    info!(steps = registry.len(), "starting processors");
    for (index, entry) in registry.iter().enumerate() {
        debug!(step = index, "running {}", entry);
        if let Err(e) = table.invoke(uploader, &entry.operation, &entry.arguments) {
            warn!(step = index, operation = %entry.operation, "processor failed; skipping remaining steps");
            return Err(e);
        }
    }
    info!("processors finished");
    Ok(())
}
