use crate::core::models::header::HeaderRecord;
use crate::core::models::selection::SelectionMask;
use crate::core::models::structure::StructureData;
use crate::core::models::volume::VolumeData;
use crate::core::utils::bounds::BoundingRegion;
use crate::engine::config::GenerationConfig;
use crate::engine::error::GenerationError;
use crate::engine::ranges::GridShape;
use crate::engine::registry::ProviderRegistry;
use crate::engine::selection::select_atoms;
use crate::fields::CalculationRequest;
use tracing::{info, instrument};

/// The lifecycle of one volumetric generation request.
///
/// Transitions are strictly ordered; no state may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    Unconfigured,
    SelectionReady,
    RangesComputed,
    HeaderWritten,
    Filled,
    Delivered,
}

/// The pipeline driver for the volumetric path.
///
/// One reader serves exactly one generation request: configure the selection,
/// compute grid ranges, emit the provenance header, fill the cube through a
/// scalar-field provider, and deliver the result. Strategy objects (the
/// structure view, configuration, and provider registry) are injected by
/// reference; the reader owns only the per-request state.
pub struct VolumetricReader<'a> {
    structure: &'a StructureData<'a>,
    input_mask: &'a SelectionMask,
    config: &'a GenerationConfig,
    registry: &'a ProviderRegistry,
    state: ReaderState,
    selection: SelectionMask,
    region: Option<BoundingRegion>,
    shape: Option<GridShape>,
    header: HeaderRecord,
    volume: Option<VolumeData>,
}

impl<'a> VolumetricReader<'a> {
    /// Creates an unconfigured reader for one request.
    pub fn new(
        structure: &'a StructureData<'a>,
        input_mask: &'a SelectionMask,
        config: &'a GenerationConfig,
        registry: &'a ProviderRegistry,
    ) -> Self {
        Self {
            structure,
            input_mask,
            config,
            registry,
            state: ReaderState::Unconfigured,
            selection: SelectionMask::none(structure.atom_count()),
            region: None,
            shape: None,
            header: HeaderRecord::new(),
            volume: None,
        }
    }

    /// The current pipeline state.
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// The filtered selection, once `setup` has run.
    pub fn selection(&self) -> &SelectionMask {
        &self.selection
    }

    /// The provenance header accumulated so far.
    pub fn header(&self) -> &HeaderRecord {
        &self.header
    }

    fn expect_state(
        &self,
        operation: &'static str,
        expected: ReaderState,
    ) -> Result<(), GenerationError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(GenerationError::OutOfOrder {
                operation,
                expected,
                actual: self.state,
            })
        }
    }

    /// Performs atom selection: `Unconfigured → SelectionReady`.
    ///
    /// When the request maps values onto an existing surface (`is_map_data`),
    /// hydrogen exclusion is disabled so the mapped values see every atom the
    /// surface was built from.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::EmptySelection`] if no usable atoms remain,
    /// or [`GenerationError::InvalidSelection`] for an out-of-range mask.
    #[instrument(skip_all, name = "reader_setup")]
    pub fn setup(&mut self, is_map_data: bool) -> Result<(), GenerationError> {
        self.expect_state("setup", ReaderState::Unconfigured)?;
        let exclude_hydrogens = self.config.exclude_hydrogens && !is_map_data;
        let (selection, region) = select_atoms(
            self.structure,
            self.input_mask,
            exclude_hydrogens,
            self.config.grid.margin,
        )?;
        let Some(region) = region else {
            return Err(GenerationError::EmptySelection {
                field_type: self.config.field_type.clone(),
            });
        };
        info!(
            atoms = selection.selected_count(),
            "atoms will be used in the field calculation"
        );
        self.selection = selection;
        self.region = Some(region);
        self.state = ReaderState::SelectionReady;
        Ok(())
    }

    /// Computes the discrete grid ranges: `SelectionReady → RangesComputed`.
    pub fn compute_ranges(&mut self) -> Result<&GridShape, GenerationError> {
        self.expect_state("compute_ranges", ReaderState::SelectionReady)?;
        let Some(region) = self.region.as_ref() else {
            return Err(GenerationError::Internal(
                "selection ready without a bounding region".to_string(),
            ));
        };
        let shape = GridShape::compute(region, &self.config.grid)?;
        self.state = ReaderState::RangesComputed;
        Ok(self.shape.insert(shape))
    }

    /// Writes the provenance header: `RangesComputed → HeaderWritten`.
    ///
    /// Must occur before allocation so provenance always precedes data.
    pub fn write_header(&mut self) -> Result<(), GenerationError> {
        self.expect_state("write_header", ReaderState::RangesComputed)?;
        let Some(shape) = self.shape.as_ref() else {
            return Err(GenerationError::Internal(
                "ranges computed without a grid shape".to_string(),
            ));
        };
        self.header.stamp(
            &self.config.field_type,
            self.config.comment.as_deref().unwrap_or(""),
        );
        let [nx, ny, nz] = shape.counts();
        self.header
            .append_line(format!("grid {nx} x {ny} x {nz} points"));
        self.state = ReaderState::HeaderWritten;
        Ok(())
    }

    /// Allocates and fills the cube: `HeaderWritten → Filled`.
    ///
    /// The provider is resolved before the cube is allocated, so an unknown
    /// field type never leaves an allocation behind. A provider failure
    /// discards the partially filled cube and propagates unchanged.
    #[instrument(skip_all, name = "generate_cube")]
    pub fn generate_cube(&mut self) -> Result<(), GenerationError> {
        self.expect_state("generate_cube", ReaderState::HeaderWritten)?;
        let provider = self.registry.lookup(&self.config.field_type)?;
        let Some(shape) = self.shape.as_ref() else {
            return Err(GenerationError::Internal(
                "header written without a grid shape".to_string(),
            ));
        };

        let mut volume = shape.allocate();
        info!(
            field_type = %self.config.field_type,
            total_points = volume.total_points(),
            "filling voxel cube"
        );
        let mut request = CalculationRequest {
            volume: &mut volume,
            selection: &self.selection,
            structure: self.structure,
            properties: self.structure.properties(),
            subtype: self.config.subtype,
        };
        provider
            .compute(&mut request)
            .map_err(|source| GenerationError::Calculation {
                field_type: self.config.field_type.clone(),
                source,
            })?;

        self.volume = Some(volume);
        self.state = ReaderState::Filled;
        Ok(())
    }

    /// Hands the completed cube and header to the consumer:
    /// `Filled → Delivered` (terminal).
    pub fn deliver(mut self) -> Result<(VolumeData, HeaderRecord), GenerationError> {
        self.expect_state("deliver", ReaderState::Filled)?;
        let Some(volume) = self.volume.take() else {
            return Err(GenerationError::Internal(
                "filled state without a volume".to_string(),
            ));
        };
        self.state = ReaderState::Delivered;
        Ok((volume, self.header))
    }
}

impl crate::engine::mesh::SurfaceSource for VolumetricReader<'_> {
    fn read_volume_parameters(&mut self) -> Result<(), GenerationError> {
        self.setup(false)?;
        self.compute_ranges()?;
        Ok(())
    }

    fn read_volume_data(&mut self) -> Result<(), GenerationError> {
        self.write_header()?;
        self.generate_cube()
    }

    // read_surface_data keeps the default no-op success: isosurface
    // extraction from the filled cube belongs to the external consumer.
}
