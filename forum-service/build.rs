fn main() -> Result<(), Box<dyn std::error::Error>> {
    let out_dir = std::env::var("OUT_DIR")?;

    tonic_prost_build::configure()
        .file_descriptor_set_path(format!("{}/forum_descriptor.bin", out_dir))
        .compile_protos(
            &[
                "proto/category.proto",
                "proto/tag.proto",
                "proto/post.proto",
                "proto/comment.proto",
                "proto/posttag.proto",
            ],
            &["proto"],
        )?;

    println!("cargo:rerun-if-changed=proto");
    println!("cargo:rerun-if-changed=migrations");
    Ok(())
}
