//! 描画モジュール
//!
//! 順位・頻度の両対数散布図とエントロピー表を画像に描く。
//! 出力パスの拡張子が `.svg` ならSVG、それ以外はビットマップ（PNGなど）。

use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::analysis::EntropyTable;
use crate::error::{CorpusError, Result};
use crate::zipf::RankFrequency;

/// 描画設定
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// フォントファミリ（漢字グリフが必要）
    pub font: String,
    /// 散布図のサイズ
    pub plot_size: (u32, u32),
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            font: "sans-serif".to_string(),
            plot_size: (800, 600),
        }
    }
}

/// 表の各部の寸法（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableGeometry {
    pub label_width: u32,
    pub value_width: u32,
    pub row_height: u32,
    pub title_height: u32,
    pub margin: u32,
}

impl Default for TableGeometry {
    fn default() -> Self {
        Self {
            label_width: 220,
            value_width: 170,
            row_height: 36,
            title_height: 56,
            margin: 20,
        }
    }
}

/// 1文字あたりの幅の目安（16pxフォント、全角は2倍）
fn estimate_text_width(text: &str) -> u32 {
    text.chars()
        .map(|c| if c.is_ascii() { 9 } else { 17 })
        .sum()
}

impl TableGeometry {
    /// 最長のラベルが収まるようにラベル列を広げる
    pub fn for_table(table: &EntropyTable) -> Self {
        let base = Self::default();
        let longest = table
            .rows
            .iter()
            .map(|row| estimate_text_width(&row.label))
            .max()
            .unwrap_or(0);
        Self {
            label_width: base.label_width.max(longest + 24),
            ..base
        }
    }

    /// 見出し行を含めた画像全体のサイズ
    pub fn image_size(&self, rows: usize) -> (u32, u32) {
        let width = self.margin * 2 + self.label_width + self.value_width * 3;
        let height = self.margin * 2 + self.title_height + self.row_height * (rows as u32 + 1);
        (width, height)
    }

    /// 列の左端x座標（4列分と右端）
    fn column_edges(&self) -> [i32; 5] {
        let x0 = self.margin as i32;
        let x1 = x0 + self.label_width as i32;
        let v = self.value_width as i32;
        [x0, x1, x1 + v, x1 + 2 * v, x1 + 3 * v]
    }
}

/// 拡張子がsvgか
fn is_svg(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("svg"))
}

fn render_error(path: &Path, e: impl std::fmt::Display) -> CorpusError {
    CorpusError::Render {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// 対数軸の目盛り位置（10の冪と、その間の2〜9倍）
pub fn log_grid_ticks(lo: f64, hi: f64) -> (Vec<f64>, Vec<f64>) {
    let mut major = Vec::new();
    let mut minor = Vec::new();
    if !(lo > 0.0 && hi > lo) {
        return (major, minor);
    }
    let first = lo.log10().floor() as i32;
    let last = hi.log10().ceil() as i32;
    for exp in first..=last {
        let decade = 10f64.powi(exp);
        for k in 1..10 {
            let v = decade * k as f64;
            if v < lo || v > hi {
                continue;
            }
            if k == 1 {
                major.push(v);
            } else {
                minor.push(v);
            }
        }
    }
    (major, minor)
}

/// 順位・頻度の両対数散布図を保存
pub fn render_zipf_plot(series: &RankFrequency, path: &Path, config: &RenderConfig) -> Result<()> {
    if series.is_empty() {
        log::warn!("語彙が空のまま散布図を描きます");
    }
    if is_svg(path) {
        let root = SVGBackend::new(path, config.plot_size).into_drawing_area();
        draw_zipf(&root, series, &config.font).map_err(|e| render_error(path, e))?;
    } else {
        let root = BitMapBackend::new(path, config.plot_size).into_drawing_area();
        draw_zipf(&root, series, &config.font).map_err(|e| render_error(path, e))?;
    }
    log::info!("散布図を保存: {:?}", path);
    Ok(())
}

fn draw_zipf<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &RankFrequency,
    font: &str,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let points = series.points();
    // 対数軸は1以上で、点が端に張り付かないよう余白を取る
    let max_rank = points.last().map_or(10.0, |&(r, _)| r).max(10.0) * 1.5;
    let max_freq = points.first().map_or(10.0, |&(_, f)| f).max(10.0) * 1.5;

    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(root)
        .caption("Zipf's law", (font, 28))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d((0.8f64..max_rank).log_scale(), (0.8f64..max_freq).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("Rank")
        .y_desc("Frequency")
        .label_style((font, 16))
        .disable_x_mesh()
        .disable_y_mesh()
        .draw()?;

    // 主・副目盛りの破線グリッド
    let (x_lo, x_hi, y_lo, y_hi) = (0.8, max_rank, 0.8, max_freq);
    let (x_major, x_minor) = log_grid_ticks(x_lo, x_hi);
    let (y_major, y_minor) = log_grid_ticks(y_lo, y_hi);
    let grid = [(x_major, y_major, 0.3), (x_minor, y_minor, 0.12)];
    for (xs, ys, alpha) in grid {
        let style = BLACK.mix(alpha).stroke_width(1);
        for x in xs {
            chart.draw_series(DashedLineSeries::new(vec![(x, y_lo), (x, y_hi)], 4, 3, style))?;
        }
        for y in ys {
            chart.draw_series(DashedLineSeries::new(vec![(x_lo, y), (x_hi, y)], 4, 3, style))?;
        }
    }

    chart.draw_series(
        points
            .iter()
            .map(|&point| Circle::new(point, 3, BLUE.mix(0.6).filled())),
    )?;

    root.present()?;
    Ok(())
}

/// エントロピー表を画像として保存
pub fn render_entropy_table(table: &EntropyTable, path: &Path, config: &RenderConfig) -> Result<()> {
    let geometry = TableGeometry::for_table(table);
    let size = geometry.image_size(table.rows.len());
    if is_svg(path) {
        let root = SVGBackend::new(path, size).into_drawing_area();
        draw_table(&root, table, &geometry, &config.font).map_err(|e| render_error(path, e))?;
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        draw_table(&root, table, &geometry, &config.font).map_err(|e| render_error(path, e))?;
    }
    log::info!("表を保存: {:?}", path);
    Ok(())
}

/// 表のセル文字列（見出し行＋各行）
pub fn table_cells(table: &EntropyTable) -> Vec<[String; 4]> {
    let mut cells = vec![table.headers()];
    cells.extend(table.rows.iter().map(|row| {
        let [h1, h2, h3] = row.entropy.as_array();
        [
            row.label.clone(),
            format!("{:.6}", h1),
            format!("{:.6}", h2),
            format!("{:.6}", h3),
        ]
    }));
    cells
}

fn draw_table<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &EntropyTable,
    geometry: &TableGeometry,
    font: &str,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let (width, _) = geometry.image_size(table.rows.len());
    let centered = Pos::new(HPos::Center, VPos::Center);
    let title_style = TextStyle::from((font, 24).into_font()).pos(centered);
    let cell_style = TextStyle::from((font, 16).into_font()).pos(centered);
    let header_style = TextStyle::from((font, 16).into_font().style(FontStyle::Bold)).pos(centered);

    let title_y = (geometry.margin + geometry.title_height / 2) as i32;
    root.draw_text(&table.title, &title_style, ((width / 2) as i32, title_y))?;

    let edges = geometry.column_edges();
    let top = (geometry.margin + geometry.title_height) as i32;
    let row_height = geometry.row_height as i32;

    for (r, cells) in table_cells(table).iter().enumerate() {
        let y0 = top + r as i32 * row_height;
        let y1 = y0 + row_height;
        if r == 0 {
            root.draw(&Rectangle::new(
                [(edges[0], y0), (edges[4], y1)],
                RGBColor(230, 236, 245).filled(),
            ))?;
        }
        for (c, text) in cells.iter().enumerate() {
            let (x0, x1) = (edges[c], edges[c + 1]);
            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], BLACK.stroke_width(1)))?;
            let style = if r == 0 { &header_style } else { &cell_style };
            root.draw_text(text, style, ((x0 + x1) / 2, (y0 + y1) / 2))?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{word_entropy_table, TokenizedDocument};

    #[test]
    fn test_image_size_grows_with_rows() {
        let g = TableGeometry::default();
        let (w, h1) = g.image_size(1);
        let (_, h3) = g.image_size(3);
        assert_eq!(w, 20 * 2 + 220 + 170 * 3);
        assert_eq!(h3 - h1, 2 * g.row_height);
    }

    #[test]
    fn test_column_edges() {
        let edges = TableGeometry::default().column_edges();
        assert_eq!(edges, [20, 240, 410, 580, 750]);
    }

    fn sample_table(label: &str) -> EntropyTable {
        let docs = vec![TokenizedDocument {
            name: label.to_string(),
            words: vec!["猫".to_string(), "爱".to_string(), "鱼".to_string()],
        }];
        word_entropy_table(&docs, "所有小说")
    }

    fn assert_written(path: &Path) {
        let meta = std::fs::metadata(path).unwrap();
        assert!(meta.len() > 0, "{:?} is empty", path);
    }

    #[test]
    fn test_render_svg_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let config = RenderConfig::default();

        let series = RankFrequency::from_tokens(["猫", "猫", "猫", "爱", "爱", "鱼"]);
        let plot = dir.path().join("zipf.svg");
        render_zipf_plot(&series, &plot, &config).unwrap();
        assert_written(&plot);

        let empty_plot = dir.path().join("empty.svg");
        render_zipf_plot(&RankFrequency::default(), &empty_plot, &config).unwrap();
        assert_written(&empty_plot);

        let table = dir.path().join("word.svg");
        render_entropy_table(&sample_table("甲.txt"), &table, &config).unwrap();
        assert_written(&table);
        let content = std::fs::read_to_string(&table).unwrap();
        assert!(content.contains("甲.txt"));
    }

    #[test]
    fn test_render_into_missing_dir_fails() {
        let path = Path::new("no/such/dir/word.svg");
        let err = render_entropy_table(&sample_table("甲.txt"), path, &RenderConfig::default());
        assert!(err.is_err());
    }

    #[test]
    fn test_label_column_fits_long_names() {
        let short = TableGeometry::for_table(&sample_table("甲.txt"));
        assert_eq!(short, TableGeometry::default());

        let long_name = "天龙八部第一卷至第五十卷全本校订版本.txt";
        let long = TableGeometry::for_table(&sample_table(long_name));
        assert!(long.label_width >= estimate_text_width(long_name));
        assert!(long.image_size(2).0 > short.image_size(2).0);
    }

    #[test]
    fn test_log_grid_ticks() {
        let (major, minor) = log_grid_ticks(1.0, 150.0);
        assert_eq!(major, [1.0, 10.0, 100.0]);
        assert_eq!(minor.len(), 8 + 8);
        assert!(minor.contains(&2.0) && minor.contains(&90.0));
        assert!(log_grid_ticks(0.0, 10.0).0.is_empty());
    }

    #[test]
    fn test_is_svg() {
        assert!(is_svg(Path::new("word.SVG")));
        assert!(!is_svg(Path::new("word.png")));
        assert!(!is_svg(Path::new("word")));
    }

    #[test]
    fn test_table_cells() {
        let docs = vec![TokenizedDocument {
            name: "甲.txt".to_string(),
            words: vec!["猫".to_string(), "鱼".to_string()],
        }];
        let cells = table_cells(&word_entropy_table(&docs, "所有小说"));
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0][0], "采用文本");
        assert_eq!(cells[1], ["甲.txt", "1.000000", "0.000000", "0.000000"]);
        assert_eq!(cells[2][0], "所有小说");
    }
}
