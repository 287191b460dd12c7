use eclipse_map::eclipse_errors::EclipseError;
use eclipse_map::raster::PercentageGrid;
use eclipse_map::search::GridSink;
use eclipse_map::time::Instant;

/// What a [`CollectingSink`] remembers of one emitted grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub index: u32,
    pub instant: Instant,
    pub rows: usize,
    pub cols: usize,
    pub max: f64,
    pub min: f64,
}

/// In-memory sink keeping a summary of every grid.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub frames: Vec<Frame>,
}

impl GridSink for CollectingSink {
    fn emit(
        &mut self,
        grid: &PercentageGrid,
        index: u32,
        instant: &Instant,
    ) -> Result<(), EclipseError> {
        let min = grid.values().iter().copied().fold(f64::INFINITY, f64::min);
        self.frames.push(Frame {
            index,
            instant: *instant,
            rows: grid.rows(),
            cols: grid.cols(),
            max: grid.max(),
            min,
        });
        Ok(())
    }
}
