#![no_main]

use libfuzzer_sys::fuzz_target;

use runway_core::GrowthModel;

fn f64_at(data: &[u8], i: usize) -> f64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&data[i..i + 8]);
    f64::from_le_bytes(buf)
}

fn assert_defined(model: &GrowthModel) {
    let t = model.trajectory();
    assert!(t.rev0 > 0.0 && t.rev0.is_finite());
    assert!(t.exp0 > 0.0 && t.exp0.is_finite());
    assert!(t.rev_growth > -1.0 && t.exp_growth > -1.0);
    model
        .metrics()
        .check_finite()
        .expect("committed metrics must be finite");
}

fuzz_target!(|data: &[u8]| {
    let mut model = GrowthModel::new();

    // Each 17-byte chunk: opcode, week, value.
    for chunk in data.chunks_exact(17) {
        let week = f64_at(chunk, 1);
        let value = f64_at(chunk, 9);
        let before = *model.trajectory();

        let result = match chunk[0] % 6 {
            0 => model.set_revenue_at_week(week, value),
            1 => model.set_expense_at_week(week, value),
            2 => model.set_revenue_at_week(0.0, value),
            3 => model.evolve(week),
            4 => {
                model.cycle_display_unit();
                Ok(())
            }
            _ => {
                model.note_interaction();
                model.animate(week);
                Ok(())
            }
        };

        // Rejected operations must leave the model untouched.
        if result.is_err() {
            assert_eq!(*model.trajectory(), before);
        }
        assert_defined(&model);

        let _ = model.revenue_at_week(week);
        let _ = model.expense_at_week(week);
    }
});
