use crate::common::*;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[doc = "Sample standard deviation (n - 1 denominator). `None` below two values."]
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let avg: f64 = mean(values)?;
    let var: f64 =
        values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out: Vec<f64> = values.to_vec();
    out.sort_by(|a, b| a.total_cmp(b));
    out
}

#[doc = "Quantile of already sorted data with linear interpolation between closest ranks."]
pub fn quantile(sorted_values: &[f64], q: f64) -> Option<f64> {
    if sorted_values.is_empty() {
        return None;
    }
    let pos: f64 = q.clamp(0.0, 1.0) * (sorted_values.len() - 1) as f64;
    let lower: usize = pos.floor() as usize;
    let upper: usize = pos.ceil() as usize;
    let weight: f64 = pos - lower as f64;
    Some(sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * weight)
}

pub fn data_range(values: &[f64]) -> Option<(f64, f64)> {
    let lo: f64 = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi: f64 = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        Some((lo, hi))
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

#[doc = r#"
    Five-number summary for a box plot.
    Whiskers reach the most extreme observations within 1.5 IQR of the quartiles;
    anything further out is reported as an outlier.
"#]
pub fn box_stats(values: &[f64]) -> Option<BoxStats> {
    let data: Vec<f64> = sorted(values);
    let q1: f64 = quantile(&data, 0.25)?;
    let median: f64 = quantile(&data, 0.5)?;
    let q3: f64 = quantile(&data, 0.75)?;
    let iqr: f64 = q3 - q1;
    let fence_low: f64 = q1 - 1.5 * iqr;
    let fence_high: f64 = q3 + 1.5 * iqr;

    let inside: Vec<f64> = data
        .iter()
        .copied()
        .filter(|v| *v >= fence_low && *v <= fence_high)
        .collect();

    let whisker_low: f64 = inside.first().copied().unwrap_or(q1);
    let whisker_high: f64 = inside.last().copied().unwrap_or(q3);
    let outliers: Vec<f64> = data
        .into_iter()
        .filter(|v| *v < fence_low || *v > fence_high)
        .collect();

    Some(BoxStats {
        q1,
        median,
        q3,
        whisker_low,
        whisker_high,
        outliers,
    })
}

#[doc = "Scott's rule: sample std times n^(-1/5). `None` when the data has no spread."]
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let std: f64 = sample_std(values)?;
    if std <= 0.0 || !std.is_finite() {
        return None;
    }
    Some(std * (values.len() as f64).powf(-0.2))
}

pub fn linspace(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step: f64 = (hi - lo) / (count - 1) as f64;
            (0..count).map(|i| lo + step * i as f64).collect()
        }
    }
}

#[doc = "Gaussian kernel density of `values` evaluated at each grid point."]
pub fn gaussian_kde(values: &[f64], grid: &[f64], bandwidth: f64) -> Vec<f64> {
    let norm: f64 = 1.0 / (values.len() as f64 * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    grid.iter()
        .map(|x| {
            values
                .iter()
                .map(|xi| {
                    let z: f64 = (x - xi) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

#[doc = r#"
    Equal-width binning of `values` over `[lo, hi]`.
    Bins are half-open except the last, which also holds `hi`. Values outside the range are ignored.
"#]
pub fn histogram(values: &[f64], lo: f64, hi: f64, bins: usize) -> Histogram {
    let bins: usize = bins.max(1);
    let edges: Vec<f64> = linspace(lo, hi, bins + 1);
    let width: f64 = (hi - lo) / bins as f64;
    let mut counts: Vec<usize> = vec![0; bins];

    for v in values.iter().copied().filter(|v| *v >= lo && *v <= hi) {
        let idx: usize = if width > 0.0 {
            (((v - lo) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

#[doc = "Widens a degenerate or empty span so axis ranges never collapse."]
pub fn padded_range(lo: f64, hi: f64, fraction: f64) -> Range<f64> {
    if !(lo.is_finite() && hi.is_finite()) {
        return 0.0..1.0;
    }
    let span: f64 = hi - lo;
    if span <= f64::EPSILON * lo.abs().max(1.0) {
        let pad: f64 = (lo.abs() * 0.1).max(0.5);
        return (lo - pad)..(hi + pad);
    }
    (lo - span * fraction)..(hi + span * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn quantiles_interpolate_linearly() {
        let data: Vec<f64> = vec![1.0, 2.0, 3.0, 4.0];
        assert!(close(quantile(&data, 0.5).unwrap(), 2.5));
        assert!(close(quantile(&data, 0.25).unwrap(), 1.75));
        assert!(close(quantile(&data, 1.0).unwrap(), 4.0));
        assert!(quantile(&[], 0.5).is_none());
    }

    #[test]
    fn box_stats_separate_outliers() {
        let stats: BoxStats = box_stats(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(stats.outliers, vec![100.0]);
        assert!(close(stats.whisker_low, 1.0));
        assert!(close(stats.whisker_high, 5.0));
        assert!(close(stats.median, 3.5));
    }

    #[test]
    fn sample_std_needs_two_values() {
        assert!(sample_std(&[1.0]).is_none());
        assert!(close(sample_std(&[2.0, 4.0]).unwrap(), std::f64::consts::SQRT_2));
    }

    #[test]
    fn scott_bandwidth_rejects_constant_data() {
        assert!(scott_bandwidth(&[3.0, 3.0, 3.0]).is_none());
        assert!(scott_bandwidth(&[1.0, 2.0, 3.0]).unwrap() > 0.0);
    }

    #[test]
    fn kde_integrates_to_about_one() {
        let values: Vec<f64> = vec![1.0, 2.0, 2.5, 3.0, 7.0];
        let bw: f64 = scott_bandwidth(&values).unwrap();
        let grid: Vec<f64> = linspace(-10.0, 20.0, 3001);
        let step: f64 = grid[1] - grid[0];
        let area: f64 = gaussian_kde(&values, &grid, bw).iter().sum::<f64>() * step;
        assert!((area - 1.0).abs() < 1e-3, "area = {}", area);
    }

    #[test]
    fn histogram_puts_maximum_in_last_bin() {
        let hist: Histogram = histogram(&[0.0, 0.5, 1.0, 10.0], 0.0, 10.0, 10);
        assert_eq!(hist.edges.len(), 11);
        assert_eq!(hist.counts[0], 2);
        assert_eq!(hist.counts[1], 1);
        assert_eq!(hist.counts[9], 1);
        assert_eq!(hist.counts.iter().sum::<usize>(), 4);
    }

    #[test]
    fn padded_range_widens_single_points() {
        let range: Range<f64> = padded_range(5.0, 5.0, 0.05);
        assert!(range.start < 5.0 && range.end > 5.0);
        let range: Range<f64> = padded_range(0.0, 10.0, 0.1);
        assert!(close(range.start, -1.0) && close(range.end, 11.0));
    }
}
