//! End-to-end behaviour of the analysis pipeline.

use std::f32::consts::PI;

use frequency_core::spectrum::peak_bin;
use frequency_core::{AnalysisError, Parameters, SpectrumAnalyzer, estimate_frequency};

fn sine(frequency: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| amplitude * (2.0 * PI * frequency * i as f32 / sample_rate as f32).sin())
        .collect()
}

#[test]
fn bin_aligned_sine_is_recovered_exactly() {
    let params = Parameters::new(44100, 1024).unwrap();
    let bin_width = params.bin_width();
    let frequency = 10.0 * bin_width; // ~430.66 Hz

    let estimate = estimate_frequency(sine(frequency, 44100, 1024, 0.8), &params).unwrap();

    assert_eq!(estimate, 10.0 * bin_width);
    assert!((estimate - 430.664).abs() < 0.01);
}

#[test]
fn off_bin_sine_lands_within_one_bin() {
    let params = Parameters::new(44100, 1024).unwrap();
    let analyzer = SpectrumAnalyzer::new(params);

    for &frequency in &[440.0_f32, 1000.0, 2500.0, 5123.0] {
        let estimate = analyzer
            .estimate_frequency(sine(frequency, 44100, 1024, 0.5))
            .unwrap();
        assert!(
            (estimate - frequency).abs() <= params.bin_width(),
            "{frequency} Hz estimated as {estimate} Hz"
        );
    }
}

#[test]
fn silence_reads_zero_hz() {
    let params = Parameters::default();
    assert_eq!(estimate_frequency(vec![0.0; 1024], &params).unwrap(), 0.0);
}

#[test]
fn scaling_the_input_keeps_the_estimate() {
    let params = Parameters::new(48000, 2048).unwrap();
    let analyzer = SpectrumAnalyzer::new(params);
    let base = sine(1234.0, 48000, 2048, 0.1);

    let reference = analyzer.estimate_frequency(base.clone()).unwrap();
    for &c in &[0.5_f32, 3.0, 250.0] {
        let scaled: Vec<f32> = base.iter().map(|s| s * c).collect();
        assert_eq!(analyzer.estimate_frequency(scaled).unwrap(), reference);
    }
}

#[test]
fn non_power_of_two_frame_size_is_a_configuration_error() {
    let err = Parameters::new(44100, 1000).unwrap_err();
    assert_eq!(err, AnalysisError::FrameSizeNotPowerOfTwo(1000));
    assert!(err.is_configuration());

    assert!(Parameters::new(0, 1024).unwrap_err().is_configuration());
}

#[test]
fn equal_peaks_pick_the_lower_bin() {
    let mut magnitudes = vec![0.0_f32; 512];
    magnitudes[3] = 42.0;
    magnitudes[7] = 42.0;
    for _ in 0..10 {
        assert_eq!(peak_bin(&magnitudes), Some(3));
    }
}

#[test]
fn repeated_calls_do_not_share_state() {
    let params = Parameters::default();
    let analyzer = SpectrumAnalyzer::new(params);
    let frame = sine(700.0, 44100, 1024, 0.3);

    let first = analyzer.estimate_frequency(frame.clone()).unwrap();
    let second = analyzer.estimate_frequency(frame.clone()).unwrap();
    assert_eq!(first, second);

    // A different frame in between changes nothing either.
    analyzer.estimate_frequency(sine(3000.0, 44100, 1024, 0.3)).unwrap();
    assert_eq!(analyzer.estimate_frequency(frame).unwrap(), first);
}

#[test]
fn analyzers_with_different_frame_sizes_coexist() {
    let small = SpectrumAnalyzer::new(Parameters::new(8000, 256).unwrap());
    let large = SpectrumAnalyzer::new(Parameters::new(8000, 4096).unwrap());

    let small_hz = small.estimate_frequency(sine(31.25 * 16.0, 8000, 256, 1.0)).unwrap();
    let large_hz = large.estimate_frequency(sine(31.25 * 16.0, 8000, 4096, 1.0)).unwrap();

    assert_eq!(small_hz, 500.0);
    assert_eq!(large_hz, 500.0);
}

#[test]
fn concurrent_calls_are_independent() {
    let params = Parameters::default();
    let handles: Vec<_> = (1..=4)
        .map(|k| {
            std::thread::spawn(move || {
                let frequency = 20.0 * k as f32 * params.bin_width();
                let hz = estimate_frequency(sine(frequency, 44100, 1024, 1.0), &params).unwrap();
                (frequency, hz)
            })
        })
        .collect();

    for handle in handles {
        let (expected, hz) = handle.join().unwrap();
        assert!((hz - expected).abs() < 1e-3);
    }
}
