use csg_nut::gpu::build_gpu_shader_wgsl;

fn validate_wgsl(source: &str) -> naga::Module {
    let module = match naga::front::wgsl::parse_str(source) {
        Ok(m) => m,
        Err(e) => panic!(
            "WGSL parsing error:\n{error_report}",
            error_report = e.emit_to_string(source)
        ),
    };

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::all(),
    );
    if let Err(e) = validator.validate(&module) {
        panic!(
            "WGSL validation error:\n{error_report}",
            error_report = e.emit_to_string(source)
        );
    }
    module
}

#[test]
fn nut_shader_compiles() {
    validate_wgsl(&build_gpu_shader_wgsl());
}

#[test]
fn nut_shader_exposes_compute_entry_point() {
    let module = validate_wgsl(&build_gpu_shader_wgsl());
    let entry = module
        .entry_points
        .iter()
        .find(|entry| entry.name == "main")
        .expect("main entry point");
    assert_eq!(entry.stage, naga::ShaderStage::Compute);
    assert_eq!(entry.workgroup_size, [8, 8, 1]);
}
