//! Chart rendering via plotters
//!
//! Three figures, written as PNG files:
//! - `distributions.png`: Age histogram by survival + survival counts per
//!   passenger class
//! - `confusion_matrix.png`: annotated 2x2 heatmap
//! - `roc_curve.png`: ROC curve with AUC legend and random-guess diagonal

use crate::error::{Result, TitanicError};
use crate::metrics::{ConfusionMatrix, RocCurve};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

const SURVIVED_COLOR: RGBColor = RGBColor(66, 133, 244);
const DIED_COLOR: RGBColor = RGBColor(219, 68, 55);

fn plot_err(e: impl std::fmt::Display) -> TitanicError {
    TitanicError::PlotError(e.to_string())
}

/// Age distribution by survival (left) and survival counts per class (right).
pub fn render_distributions(
    ages: &[f64],
    pclass: &[i64],
    survived: &[f64],
    path: &Path,
) -> Result<()> {
    distributions_impl(ages, pclass, survived, path).map_err(plot_err)
}

/// Confusion matrix heatmap with cell annotations.
pub fn render_confusion_matrix(cm: &ConfusionMatrix, path: &Path) -> Result<()> {
    confusion_impl(cm, path).map_err(plot_err)
}

/// ROC curve with the AUC in the legend and the diagonal random-guess line.
pub fn render_roc_curve(roc: &RocCurve, auc: f64, path: &Path) -> Result<()> {
    roc_impl(roc, auc, path).map_err(plot_err)
}

fn distributions_impl(
    ages: &[f64],
    pclass: &[i64],
    survived: &[f64],
    path: &Path,
) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let panels = root.split_evenly((1, 2));

    // Left panel: age histogram split by survival
    let bin_width = 5.0;
    let max_age = ages.iter().cloned().fold(0.0f64, f64::max).max(bin_width);
    let n_bins = (max_age / bin_width).ceil() as usize;

    let mut died_counts = vec![0usize; n_bins];
    let mut surv_counts = vec![0usize; n_bins];
    for (&age, &s) in ages.iter().zip(survived.iter()) {
        let bin = ((age / bin_width) as usize).min(n_bins - 1);
        if s > 0.5 {
            surv_counts[bin] += 1;
        } else {
            died_counts[bin] += 1;
        }
    }

    let y_max = died_counts
        .iter()
        .chain(surv_counts.iter())
        .cloned()
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let mut chart = ChartBuilder::on(&panels[0])
        .caption("Age Distribution by Survival", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..(n_bins as f64 * bin_width), 0.0..(y_max * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Age")
        .y_desc("Count")
        .draw()?;

    chart
        .draw_series(died_counts.iter().enumerate().map(|(i, &c)| {
            let x0 = i as f64 * bin_width;
            Rectangle::new(
                [(x0, 0.0), (x0 + bin_width, c as f64)],
                DIED_COLOR.mix(0.5).filled(),
            )
        }))?
        .label("Not Survived")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], DIED_COLOR.filled()));

    chart
        .draw_series(surv_counts.iter().enumerate().map(|(i, &c)| {
            let x0 = i as f64 * bin_width;
            Rectangle::new(
                [(x0, 0.0), (x0 + bin_width, c as f64)],
                SURVIVED_COLOR.mix(0.5).filled(),
            )
        }))?
        .label("Survived")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], SURVIVED_COLOR.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    // Right panel: survival counts per passenger class
    let classes: Vec<i64> = {
        let mut cs: Vec<i64> = pclass.to_vec();
        cs.sort_unstable();
        cs.dedup();
        cs
    };

    let mut class_died = vec![0usize; classes.len()];
    let mut class_surv = vec![0usize; classes.len()];
    for (&c, &s) in pclass.iter().zip(survived.iter()) {
        if let Some(pos) = classes.iter().position(|&k| k == c) {
            if s > 0.5 {
                class_surv[pos] += 1;
            } else {
                class_died[pos] += 1;
            }
        }
    }

    let bar_max = class_died
        .iter()
        .chain(class_surv.iter())
        .cloned()
        .max()
        .unwrap_or(1)
        .max(1) as f64;

    let mut chart = ChartBuilder::on(&panels[1])
        .caption("Survival by Passenger Class", ("sans-serif", 22))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..(classes.len() as f64), 0.0..(bar_max * 1.1))?;

    chart
        .configure_mesh()
        .x_desc("Pclass")
        .y_desc("Count")
        .x_labels(classes.len())
        .x_label_formatter(&|v| {
            let idx = *v as usize;
            if *v == idx as f64 && idx < classes.len() {
                // Tick at the left edge of a group: label with the class
                format!("{}", classes[idx])
            } else {
                String::new()
            }
        })
        .draw()?;

    chart
        .draw_series(class_died.iter().enumerate().map(|(i, &c)| {
            let x0 = i as f64 + 0.15;
            Rectangle::new([(x0, 0.0), (x0 + 0.3, c as f64)], DIED_COLOR.filled())
        }))?
        .label("Not Survived")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], DIED_COLOR.filled()));

    chart
        .draw_series(class_surv.iter().enumerate().map(|(i, &c)| {
            let x0 = i as f64 + 0.55;
            Rectangle::new([(x0, 0.0), (x0 + 0.3, c as f64)], SURVIVED_COLOR.filled())
        }))?
        .label("Survived")
        .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], SURVIVED_COLOR.filled()));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn confusion_impl(cm: &ConfusionMatrix, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (800, 640)).into_drawing_area();
    root.fill(&WHITE)?;

    let counts = cm.as_array();
    let total = cm.total().max(1) as f64;

    // Cell grid geometry in pixels
    let (left, top) = (180i32, 90i32);
    let (cell_w, cell_h) = (270i32, 220i32);
    let labels = ["Not Survived", "Survived"];

    root.draw(&Text::new(
        "Confusion Matrix",
        (320, 25),
        ("sans-serif", 28).into_font().color(&BLACK),
    ))?;

    for (i, row) in counts.iter().enumerate() {
        for (j, &count) in row.iter().enumerate() {
            let x0 = left + j as i32 * cell_w;
            let y0 = top + i as i32 * cell_h;
            let intensity = count as f64 / total;

            // White-to-blue ramp scaled by the cell's share of samples
            let blend = |lo: f64, hi: f64| (lo + (hi - lo) * intensity) as u8;
            let fill = RGBColor(blend(247.0, 8.0), blend(251.0, 81.0), blend(255.0, 156.0));

            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                fill.filled(),
            ))?;
            root.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell_w, y0 + cell_h)],
                BLACK.stroke_width(1),
            ))?;

            let text_color = if intensity > 0.5 { &WHITE } else { &BLACK };
            root.draw(&Text::new(
                format!("{}", count),
                (x0 + cell_w / 2 - 15, y0 + cell_h / 2 - 12),
                ("sans-serif", 30).into_font().color(text_color),
            ))?;
        }
    }

    // Axis tick labels
    for (j, label) in labels.iter().enumerate() {
        root.draw(&Text::new(
            *label,
            (left + j as i32 * cell_w + cell_w / 2 - 50, top + 2 * cell_h + 15),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))?;
    }
    for (i, label) in labels.iter().enumerate() {
        root.draw(&Text::new(
            *label,
            (left - 130, top + i as i32 * cell_h + cell_h / 2 - 8),
            ("sans-serif", 20).into_font().color(&BLACK),
        ))?;
    }

    root.draw(&Text::new(
        "Predicted",
        (left + cell_w - 45, top + 2 * cell_h + 50),
        ("sans-serif", 24).into_font().color(&BLACK),
    ))?;
    root.draw(&Text::new(
        "Actual",
        (15, top + cell_h - 30),
        ("sans-serif", 24)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK),
    ))?;

    root.present()?;
    Ok(())
}

fn roc_impl(roc: &RocCurve, auc: f64, path: &Path) -> std::result::Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("ROC Curve", ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0.0f64..1.0, 0.0f64..1.0)?;

    chart
        .configure_mesh()
        .x_desc("False Positive Rate")
        .y_desc("True Positive Rate")
        .draw()?;

    let points = roc.fpr.iter().cloned().zip(roc.tpr.iter().cloned());
    chart
        .draw_series(LineSeries::new(points, SURVIVED_COLOR.stroke_width(2)))?
        .label(format!("ROC curve (AUC = {:.2})", auc))
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], SURVIVED_COLOR.stroke_width(2))
        });

    // Random guess diagonal
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (1.0, 1.0)],
        BLACK.mix(0.5),
    )))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}
