use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{
    BandScale, BinSelection, BinSet, ChartLayout, Color, Dataset, LinearScale, Period, Record,
    ZoomRange, classify,
};
use crate::error::VizResult;
use crate::interaction::{EmphasisState, SelectionModel};

use super::config::PipelineConfig;
use super::compare::{CompareModel, growth_rate};
use super::view::{SortSpec, ViewQuery, view};

/// Resolved render style for one mark (bar, area slice or map region).
///
/// Bin/color fields are populated only when a bin table is configured
/// (choropleth use); bar charts consume opacity and emphasis alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkStyle {
    pub entity: String,
    pub value: Option<f64>,
    /// Leading-edge offset along the band axis.
    pub band_offset: f64,
    /// Bar length along the value axis; zero for missing values.
    pub length_px: f64,
    pub bin: Option<usize>,
    pub color: Option<Color>,
    pub opacity: f64,
    pub emphasis: EmphasisState,
    pub compare_value: Option<f64>,
    pub compare_length_px: Option<f64>,
}

/// Derived statistics for one visible entity, shown in detail cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub entity: String,
    /// 1-based position in the current view order.
    pub rank: usize,
    pub value: Option<f64>,
    pub compare_value: Option<f64>,
    /// Growth versus the immediately preceding period, in percent.
    /// `None` when the prior value is absent or zero.
    pub growth_rate_pct: Option<f64>,
}

/// Everything a renderer needs for one synchronous draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub rows: Vec<Record>,
    pub band: BandScale,
    pub linear: LinearScale,
    pub marks: Vec<MarkStyle>,
    pub summaries: Vec<EntitySummary>,
    pub layout: ChartLayout,
    pub active_period: Period,
    pub compare_period: Option<Period>,
    /// Explicit empty-state signal: the filtered view produced no rows, so
    /// hosts render an empty-state message instead of an empty chart.
    pub no_data: bool,
}

/// Tabular export boundary: the ordered rows plus the periods in effect at
/// the moment export was requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSnapshot {
    pub rows: Vec<Record>,
    pub active_period: Period,
    pub compare_period: Option<Period>,
}

/// One chart instance: a dataset snapshot plus all interactive control state.
///
/// Every mutator leaves the pipeline consistent and `frame()` recomputes the
/// derived view from current state alone, so the output is a pure function
/// of the latest controls. Instances share nothing; each chart on a page
/// owns its own pipeline.
#[derive(Debug, Clone)]
pub struct ChartPipeline {
    dataset: Dataset,
    config: PipelineConfig,
    bins: Option<BinSet>,
    search_text: String,
    sort: SortSpec,
    zoom: Option<ZoomRange>,
    selection: SelectionModel,
    bin_selection: BinSelection,
    compare: CompareModel,
    restrict_to_selection: bool,
    layout: ChartLayout,
}

impl ChartPipeline {
    pub fn new(
        dataset: Dataset,
        config: PipelineConfig,
        container_width_px: f64,
    ) -> VizResult<Self> {
        config.validate()?;
        let layout = classify(container_width_px);
        debug!(
            record_count = dataset.len(),
            metric = %config.metric,
            active_period = config.active_period,
            size_class = ?layout.size_class,
            "pipeline created"
        );
        Ok(Self {
            selection: SelectionModel::new(config.opacity),
            dataset,
            config,
            bins: None,
            search_text: String::new(),
            sort: SortSpec::default(),
            zoom: None,
            bin_selection: BinSelection::new(),
            compare: CompareModel::new(),
            restrict_to_selection: false,
            layout,
        })
    }

    /// Attaches a legend bin table (choropleth use).
    #[must_use]
    pub fn with_bins(mut self, bins: BinSet) -> Self {
        self.bins = Some(bins);
        self
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionModel {
        &self.selection
    }

    #[must_use]
    pub fn bin_selection(&self) -> &BinSelection {
        &self.bin_selection
    }

    #[must_use]
    pub fn active_period(&self) -> Period {
        self.config.active_period
    }

    #[must_use]
    pub fn compare_period(&self) -> Option<Period> {
        self.compare.period()
    }

    #[must_use]
    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    #[must_use]
    pub fn zoom(&self) -> Option<ZoomRange> {
        self.zoom
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        debug!(search_len = self.search_text.len(), "set search text");
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        debug!(?sort, "set sort spec");
    }

    pub fn set_active_period(&mut self, period: Period) {
        self.config.active_period = period;
        // A compare period equal to the new active period stops comparing.
        self.compare.set_period(self.compare.period(), period);
        debug!(active_period = period, "set active period");
    }

    pub fn set_compare_period(&mut self, period: Option<Period>) {
        self.compare.set_period(period, self.config.active_period);
        debug!(compare_period = ?self.compare.period(), "set compare period");
    }

    pub fn set_zoom(&mut self, max: f64) -> VizResult<()> {
        self.zoom = Some(ZoomRange::new(max)?);
        debug!(zoom_max = max, "set zoom range");
        Ok(())
    }

    pub fn clear_zoom(&mut self) {
        self.zoom = None;
        debug!("cleared zoom range");
    }

    pub fn toggle_entity(&mut self, id: &str) {
        self.selection.toggle(id);
        debug!(
            entity = id,
            selected = self.selection.is_selected(id),
            "toggled entity selection"
        );
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        debug!("cleared entity selection");
    }

    pub fn set_hovered_entity(&mut self, id: Option<&str>) {
        self.selection.set_hovered(id);
        trace!(entity = ?id, "set hovered entity");
    }

    pub fn set_restrict_to_selection(&mut self, restrict: bool) {
        self.restrict_to_selection = restrict;
        debug!(restrict, "set restrict-to-selection");
    }

    pub fn toggle_bin(&mut self, bin_index: usize) {
        self.bin_selection.toggle(bin_index);
        debug!(
            bin_index,
            selected = self.bin_selection.is_selected(bin_index),
            "toggled legend bin"
        );
    }

    pub fn clear_bin_selection(&mut self) {
        self.bin_selection.clear();
        debug!("cleared legend bin selection");
    }

    pub fn set_hovered_bin(&mut self, bin_index: Option<usize>) {
        self.bin_selection.set_hovered(bin_index);
        trace!(bin_index = ?bin_index, "set hovered bin");
    }

    /// Reclassifies layout from a new container width (resize or
    /// fullscreen enter/exit).
    pub fn resize(&mut self, container_width_px: f64) {
        self.layout = classify(container_width_px);
        debug!(
            width = container_width_px,
            size_class = ?self.layout.size_class,
            "resized layout"
        );
    }

    /// Recomputes the derived view from current control state.
    pub fn frame(&self) -> VizResult<ChartFrame> {
        let query = self.current_query();
        let rows = view(&self.dataset, &query);
        let no_data = rows.is_empty();

        let linear = LinearScale::from_values(
            rows.iter().map(|row| row.metric(&self.config.metric)),
            self.zoom,
            self.config.headroom_ratio,
        );
        let band = BandScale::new(
            rows.iter().map(|row| row.entity.clone()).collect(),
            self.layout.plot_height(),
            self.config.band_padding_ratio,
        )?;

        let plot_width = self.layout.plot_width();
        let marks = rows
            .iter()
            .map(|row| self.mark_for(row, &band, linear, plot_width))
            .collect();
        let summaries = rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.summary_for(row, index))
            .collect();

        trace!(
            row_count = rows.len(),
            no_data,
            active_period = self.config.active_period,
            "recomputed frame"
        );

        Ok(ChartFrame {
            rows,
            band,
            linear,
            marks,
            summaries,
            layout: self.layout,
            active_period: self.config.active_period,
            compare_period: self.compare.period(),
            no_data,
        })
    }

    /// Classified color for a named geographic feature under current legend
    /// state; `None` when no bin table is configured.
    ///
    /// This is the whole contract the choropleth collaborator needs; the
    /// core stays independent of how geometry is projected to pixels.
    #[must_use]
    pub fn color_of_entity(&self, name: &str) -> Option<Color> {
        let bins = self.bins.as_ref()?;
        let value = self
            .dataset
            .value(name, self.config.active_period, &self.config.metric);
        Some(bins.color_for(value, &self.bin_selection, self.config.dim_alpha))
    }

    #[must_use]
    pub fn bins(&self) -> Option<&BinSet> {
        self.bins.as_ref()
    }

    /// Snapshot for the tabular export collaborator.
    #[must_use]
    pub fn export_snapshot(&self) -> ExportSnapshot {
        let rows = view(&self.dataset, &self.current_query());
        ExportSnapshot {
            rows,
            active_period: self.config.active_period,
            compare_period: self.compare.period(),
        }
    }

    fn current_query(&self) -> ViewQuery<'_> {
        ViewQuery {
            metric: &self.config.metric,
            active_period: self.config.active_period,
            search_text: &self.search_text,
            sort: self.sort,
            restrict_to_ids: self
                .restrict_to_selection
                .then(|| self.selection.selected_ids()),
            top_n: self.config.top_n,
        }
    }

    fn mark_for(
        &self,
        row: &Record,
        band: &BandScale,
        linear: LinearScale,
        plot_width: f64,
    ) -> MarkStyle {
        let value = row.metric(&self.config.metric);
        let compare_value = self
            .compare
            .paired_record(row, &self.dataset)
            .and_then(|paired| paired.metric(&self.config.metric));
        let bin = self.bins.as_ref().map(|bins| bins.index_of(value));
        let color = self.bins.as_ref().map(|bins| {
            bins.color_for(value, &self.bin_selection, self.config.dim_alpha)
        });

        MarkStyle {
            entity: row.entity.clone(),
            value,
            band_offset: band.position(&row.entity).unwrap_or(0.0),
            length_px: linear.value_to_pixel(value, plot_width),
            bin,
            color,
            opacity: self.selection.opacity_for(&row.entity),
            emphasis: self.selection.emphasis_for(&row.entity),
            compare_value,
            // Absent pairs render no comparison mark at all, which keeps
            // them distinguishable from a genuine zero compare value.
            compare_length_px: compare_value
                .map(|paired| linear.value_to_pixel(Some(paired), plot_width)),
        }
    }

    fn summary_for(&self, row: &Record, index: usize) -> EntitySummary {
        let value = row.metric(&self.config.metric);
        let previous = self.dataset.value(
            &row.entity,
            self.config.active_period - 1,
            &self.config.metric,
        );
        EntitySummary {
            entity: row.entity.clone(),
            rank: index + 1,
            value,
            compare_value: self
                .compare
                .paired_record(row, &self.dataset)
                .and_then(|paired| paired.metric(&self.config.metric)),
            growth_rate_pct: value.and_then(|current| growth_rate(current, previous)),
        }
    }
}
