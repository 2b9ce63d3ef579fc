use super::*;

fn opts() -> GifEncodeOpts {
    GifEncodeOpts {
        fps: 30,
        width: 480,
        ..GifEncodeOpts::default()
    }
}

fn write_png(path: &Path, w: u32, h: u32) {
    let data = vec![255u8; (w * h * 4) as usize];
    image::save_buffer_with_format(
        path,
        &data,
        w,
        h,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .unwrap();
}

#[test]
fn frame_file_names_are_recognized() {
    assert!(is_frame_file_name("frame-0001.png"));
    assert!(is_frame_file_name("frame-9999.png"));
    assert!(!is_frame_file_name("frame-1.png"));
    assert!(!is_frame_file_name("frame-00001.png"));
    assert!(!is_frame_file_name("frame-00a1.png"));
    assert!(!is_frame_file_name("metadata.txt"));
}

#[test]
fn list_frames_sorts_and_filters() {
    let tmp = tempfile::tempdir().unwrap();
    for name in ["frame-0002.png", "frame-0001.png", "metadata.txt", "frame-3.png"] {
        std::fs::write(tmp.path().join(name), b"").unwrap();
    }
    let frames = list_frames(tmp.path()).unwrap();
    let names: Vec<_> = frames
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["frame-0001.png", "frame-0002.png"]);
}

#[test]
fn list_frames_requires_at_least_one() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(matches!(
        list_frames(tmp.path()),
        Err(ReelError::ResourceNotFound(_))
    ));
}

#[test]
fn scaled_height_rounds_up() {
    assert_eq!(scaled_height(100, 50, 540), 270);
    assert_eq!(scaled_height(3, 7, 10), 24);
    assert_eq!(scaled_height(0, 7, 10), 0);
}

#[test]
fn canvas_height_uses_tallest_frame_unless_configured() {
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("frame-0001.png");
    let b = tmp.path().join("frame-0002.png");
    write_png(&a, 100, 50);
    write_png(&b, 100, 80);
    let frames = vec![a, b];

    assert_eq!(resolve_canvas_height(&frames, 540, 0).unwrap(), 432);
    assert_eq!(resolve_canvas_height(&frames, 540, 300).unwrap(), 300);
    assert_eq!(resolve_canvas_height(&[], 540, 0).unwrap(), 1);
}

#[test]
fn ffmpeg_stages_use_fixed_filters() {
    let o = opts();
    let frames = Path::new("work/frames");
    let norm = Path::new("work/norm");

    let cmd = normalize_command(&o, frames, norm, 270);
    assert_eq!(cmd.program, "ffmpeg");
    assert_eq!(
        cmd.args,
        [
            "-hide_banner",
            "-loglevel",
            "error",
            "-y",
            "-framerate",
            "30",
            "-i",
            "work/frames/frame-%04d.png",
            "-vf",
            "scale=480:270:flags=lanczos:force_original_aspect_ratio=decrease,pad=480:270:(ow-iw)/2:(oh-ih)/2:color=black,format=rgb24",
            "work/norm/frame-%04d.png",
        ]
    );

    let palette = Path::new("work/demo.palette.png");
    let cmd = palettegen_command(&o, norm, palette);
    assert_eq!(
        &cmd.args[8..],
        [
            "-vf",
            "palettegen=stats_mode=full",
            "-frames:v",
            "1",
            "work/demo.palette.png"
        ]
    );

    let cmd = paletteuse_command(&o, norm, palette, Path::new("work/demo.base.gif"));
    assert_eq!(
        &cmd.args[8..],
        [
            "-i",
            "work/demo.palette.png",
            "-lavfi",
            "paletteuse=dither=bayer:bayer_scale=3:diff_mode=rectangle",
            "work/demo.base.gif"
        ]
    );
}

#[test]
fn gifsicle_stage_is_lossless() {
    let cmd = gifsicle_command(&opts(), Path::new("a.gif"), Path::new("out/b.gif"));
    assert_eq!(cmd.program, "gifsicle");
    assert_eq!(
        cmd.command_line(),
        "gifsicle --no-warnings --optimize=3 --lossy=0 --colors 256 a.gif -o out/b.gif"
    );
}

#[test]
fn invalid_options_fail_before_any_work() {
    let tmp = tempfile::tempdir().unwrap();
    let bad = GifEncodeOpts {
        width: 0,
        ..GifEncodeOpts::default()
    };
    let err = encode_gif(tmp.path(), tmp.path(), tmp.path(), "demo", &bad).unwrap_err();
    assert_eq!(err.as_validation().map(|v| v.field.as_str()), Some("gif_width"));

    let err = encode_gif(tmp.path(), tmp.path(), tmp.path(), "demo", &opts()).unwrap_err();
    assert!(matches!(err, ReelError::ResourceNotFound(_)));
}

#[test]
fn scenario_names_that_escape_work_dir_are_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let frames = tmp.path().join("frames");
    let work = tmp.path().join("a").join("work");
    std::fs::create_dir_all(&frames).unwrap();
    std::fs::create_dir_all(work.join("normalized")).unwrap();
    write_png(&frames.join("frame-0001.png"), 2, 2);
    let keep = tmp.path().join("a").join("victim").join("keep.txt");
    std::fs::create_dir_all(keep.parent().unwrap()).unwrap();
    std::fs::write(&keep, b"keep").unwrap();

    for name in ["../../victim", "../victim", "", "a/b"] {
        let err = encode_gif(&frames, &work, tmp.path(), name, &opts()).unwrap_err();
        assert_eq!(
            err.as_validation().map(|v| v.field.as_str()),
            Some("name"),
            "{name:?}"
        );
    }
    assert!(keep.is_file());
}

#[test]
fn missing_tool_is_a_resource_error() {
    let tmp = tempfile::tempdir().unwrap();
    write_png(&tmp.path().join("frame-0001.png"), 2, 2);
    let bad = GifEncodeOpts {
        ffmpeg_bin: "gifreel-no-such-ffmpeg".to_owned(),
        ..opts()
    };

    let err = encode_gif(tmp.path(), tmp.path(), tmp.path(), "demo", &bad).unwrap_err();
    match err {
        ReelError::ResourceNotFound(msg) => assert!(msg.contains("gifreel-no-such-ffmpeg")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(!tmp.path().join("normalized").exists());
}
