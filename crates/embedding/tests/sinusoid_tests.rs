use candle_core::Device;
use embedding::positional::sinusoid_table;
use embedding::Result;

#[test]
fn first_row_is_sin_cos_of_zero() -> Result<()> {
    let table = sinusoid_table(1, 4, None, &Device::Cpu)?;
    assert_eq!(table.dims(), &[1, 4]);
    assert_eq!(table.to_vec2::<f32>()?, vec![vec![0.0, 1.0, 0.0, 1.0]]);
    Ok(())
}

#[test]
fn pad_row_is_zeroed() -> Result<()> {
    for (n, d, pad) in [(4usize, 6usize, 0usize), (10, 3, 7), (2, 1, 1)] {
        let table = sinusoid_table(n, d, Some(pad), &Device::Cpu)?.to_vec2::<f32>()?;
        assert!(table[pad].iter().all(|v| *v == 0.0), "row {pad} not zeroed");
        for (row_idx, row) in table.iter().enumerate() {
            if row_idx != pad && d > 1 {
                assert!(row.iter().any(|v| *v != 0.0));
            }
        }
    }
    Ok(())
}

#[test]
fn table_is_bit_identical_across_calls() -> Result<()> {
    let first = sinusoid_table(32, 16, Some(0), &Device::Cpu)?;
    let second = sinusoid_table(32, 16, Some(0), &Device::Cpu)?;
    let a: Vec<u32> = first
        .flatten_all()?
        .to_vec1::<f32>()?
        .iter()
        .map(|v| v.to_bits())
        .collect();
    let b: Vec<u32> = second
        .flatten_all()?
        .to_vec1::<f32>()?
        .iter()
        .map(|v| v.to_bits())
        .collect();
    assert_eq!(a, b);
    Ok(())
}

#[test]
fn frequencies_decay_with_feature_index() -> Result<()> {
    // Position 1 sees angle 1 / 10000^(2k/d) in column pair k.
    let table = sinusoid_table(2, 8, None, &Device::Cpu)?.to_vec2::<f32>()?;
    let row = &table[1];
    let angles: Vec<f32> = row.chunks(2).map(|pair| pair[0].asin()).collect();
    for window in angles.windows(2) {
        assert!(window[0] > window[1]);
    }
    assert!((row[0] - 1f32.sin()).abs() < 1e-6);
    assert!((row[1] - 1f32.cos()).abs() < 1e-6);
    Ok(())
}
