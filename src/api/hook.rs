use crate::error::ChartResult;
use crate::render::RenderingEngine;

use super::{OeeChartController, UpdatePayload};

/// Lifecycle callbacks a host view framework invokes on a bound element.
///
/// Hosts deliver callbacks serially. Errors are reported for display; none
/// of them leaves the hook unusable.
pub trait ViewHook {
    type Surface;

    fn mounted(&mut self, surface: &Self::Surface, payload: &UpdatePayload) -> ChartResult<()>;

    fn updated(&mut self, payload: &UpdatePayload) -> ChartResult<()>;

    fn destroyed(&mut self);
}

impl<E: RenderingEngine> ViewHook for OeeChartController<E> {
    type Surface = E::Surface;

    fn mounted(&mut self, surface: &E::Surface, payload: &UpdatePayload) -> ChartResult<()> {
        self.mount(surface, payload).map(|_| ())
    }

    fn updated(&mut self, payload: &UpdatePayload) -> ChartResult<()> {
        self.update(payload).map(|_| ())
    }

    fn destroyed(&mut self) {
        self.destroy();
    }
}
