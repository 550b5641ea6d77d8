use std::fs::read_to_string;
use assert_cmd::Command;
use indoc::indoc;
use predicates::prelude::*;
use tempfile::tempdir;
use util::assert_contains_inorder;
use util::test::{build_temp_dir, build_temp_file, print, write_temp_file};

const RESISTOR_TEMPLATE: &str = indoc! {r#"
    EESchema-LIBRARY Version 2.3
    #encoding utf-8
    #
    # resistor
    #
    DEF resistor R 0 0 N Y 1 F N
    F0 "R" 80 0 50 V V C CNN
    F1 "${value}" 0 0 50 V V C CNN
    DRAW
    S -40 -100 40 100 0 1 10 N
    X ~ 1 0 150 50 D 50 50 1 1 P
    X ~ 2 0 -150 50 U 50 50 1 1 P
    ENDDRAW
    ENDDEF
    #
    #End Library
"#};

const OPAMP_TABLE: &str = indoc! {"
    name,number,type,direction,section
    +,3,input,left,a
    -,2,input,left,a
    ~,1,output,right,a
    +,5,input,left,b
    -,6,input,left,b
    ~,7,output,right,b
"};

#[test]
fn version() {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));

    // when
    cmd.args(["--version"])
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout").and(predicate::str::diff("libgen 0.1.0\n")));
}

#[test]
fn no_args() {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));

    // when
    cmd
        // then
        .assert()
        .failure()
        .stderr(print("stderr").and(predicate::str::contains("Usage: libgen [OPTIONS] <COMMAND>")))
        .stdout(print("stdout"));
}

#[test]
fn symbols() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (template_path, template_dir_name) = build_temp_dir(&temp_dir, "templates");
    std::fs::write(template_path.join("resistor.lib"), RESISTOR_TEMPLATE)?;
    let (table_path, table_dir_name) = build_temp_dir(&temp_dir, "tables");
    std::fs::write(table_path.join("opamp.csv"), OPAMP_TABLE)?;

    // and
    let (_, devices_file_name) = write_temp_file(&temp_dir, "devices", "csv", indoc! {"
        name,symbol,reference,value,unit,section,description,keywords,part_number
        R_10K,resistor,R,10k,,,Resistor 10k,resistor,RC0603FR-0710KL
        LM358,opamp,U,LM358,1,a,Dual opamp,opamp,
        LM358,opamp,U,LM358,2,b,,,
    "});
    let (symbol_path, symbol_file_name) = build_temp_file(&temp_dir, "devices", "lib");
    let (desc_path, desc_file_name) = build_temp_file(&temp_dir, "devices", "dcm");
    let (trace_log_path, trace_log_file_name) = build_temp_file(&temp_dir, "trace", "log");

    // and
    let args = [
        format!("--trace={}", trace_log_file_name.to_str().unwrap()),
        "symbols".to_string(),
        format!("--csv={}", devices_file_name.to_str().unwrap()),
        format!("--symbol={}", symbol_file_name.to_str().unwrap()),
        format!("--desc={}", desc_file_name.to_str().unwrap()),
        format!("--template-path={}", template_dir_name.to_str().unwrap()),
        format!("--table-path={}", table_dir_name.to_str().unwrap()),
        "--field=7:part_number".to_string(),
    ];
    println!("args: {:?}", args);

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout"));

    // and
    let trace_content = read_to_string(trace_log_path)?;
    println!("{}", trace_content);

    assert_contains_inorder!(trace_content, [
        "Loaded 3 devices\n",
        "Generated 2 symbols\n",
    ]);

    // and
    let symbol_content = read_to_string(symbol_path)?;
    println!("{}", symbol_content);

    assert_contains_inorder!(symbol_content, [
        "EESchema-LIBRARY Version 2.3\n",
        "# R_10K\n",
        "DEF R_10K R 0 0 N Y 1 F N\n",
        "\"10k\"",
        "\"RC0603FR-0710KL\"",
        "\"PartNumber\"\n",
        "# LM358\n",
        "DEF LM358 U 0 40 Y Y 2 F N\n",
        "ENDDEF\n",
        "#End Library\n",
    ]);

    // and
    let desc_content = read_to_string(desc_path)?;
    assert_eq!(desc_content, indoc! {"
        EESchema-DOCLIB  Version 2.0
        #
        $CMP R_10K
        D Resistor 10k
        K resistor
        $ENDCMP
        #
        $CMP LM358
        D Dual opamp
        K opamp
        $ENDCMP
        #
        #End Doc Library
    "});

    Ok(())
}

#[test]
fn symbols_with_missing_template() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (_, template_dir_name) = build_temp_dir(&temp_dir, "templates");
    let (_, devices_file_name) = write_temp_file(&temp_dir, "devices", "csv", indoc! {"
        name,symbol,reference
        X1,crystal,Y
    "});
    let (_, symbol_file_name) = build_temp_file(&temp_dir, "devices", "lib");
    let (_, desc_file_name) = build_temp_file(&temp_dir, "devices", "dcm");

    // and
    let args = [
        "symbols".to_string(),
        format!("--csv={}", devices_file_name.to_str().unwrap()),
        format!("--symbol={}", symbol_file_name.to_str().unwrap()),
        format!("--desc={}", desc_file_name.to_str().unwrap()),
        format!("--template-path={}", template_dir_name.to_str().unwrap()),
        format!("--table-path={}", template_dir_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .failure()
        .stderr(print("stderr").and(predicate::str::contains("No template or pin table for symbol. symbol: 'crystal'")))
        .stdout(print("stdout"));

    Ok(())
}

#[test]
fn table() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (_, table_file_name) = write_temp_file(&temp_dir, "buffer", "csv", indoc! {"
        name,number,type,direction
        A,1,input,left
        Y,2,output,right
    "});
    let (symbol_path, symbol_file_name) = build_temp_file(&temp_dir, "buffer", "lib");

    // and
    let args = [
        "table".to_string(),
        format!("--csv={}", table_file_name.to_str().unwrap()),
        format!("--symbol={}", symbol_file_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout").and(predicate::str::contains("Generated symbol. name: buffer, pins: 2")));

    // and
    let symbol_content = read_to_string(symbol_path)?;
    println!("{}", symbol_content);

    assert_contains_inorder!(symbol_content, [
        "DEF buffer U 0 40 Y Y 1 F N\n",
        "DRAW\n",
        "X A 1 ",
        "X Y 2 ",
        "ENDDRAW\n",
    ]);

    Ok(())
}

#[test]
fn mcu() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (_, pinout_file_name) = write_temp_file(&temp_dir, "stm8", "csv", indoc! {"
        Part,STM8S003F3
        Package,TSSOP-20
        Number,Name,Type
        1,VDD,S
        2,GND,-
        3,PA0,I/O
        4,PA1,I/O
        5,PB0,I
    "});
    let (symbol_path, symbol_file_name) = build_temp_file(&temp_dir, "stm8", "lib");

    // and
    let args = [
        "mcu".to_string(),
        format!("--csv={}", pinout_file_name.to_str().unwrap()),
        format!("--symbol={}", symbol_file_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout"));

    // and
    let symbol_content = read_to_string(symbol_path)?;
    println!("{}", symbol_content);

    assert_contains_inorder!(symbol_content, [
        "DEF STM8S003F3 IC 0 40 Y Y 2 L N\n",
        "\"TSSOP-20\"",
        "X VDD 1 ",
        "X GND 2 ",
        "X PA0 3 ",
        "X PB0 5 ",
    ]);

    Ok(())
}

#[test]
fn pin_tables() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (_, connectors_file_name) = write_temp_file(&temp_dir, "connectors", "csv", indoc! {"
        name,number,orientation,decoration
        conn_1x02,2,left,
        conn_2x02,4,both,point
    "});
    let (output_path, output_dir_name) = build_temp_dir(&temp_dir, "tables");

    // and
    let args = [
        "pin-tables".to_string(),
        format!("--csv={}", connectors_file_name.to_str().unwrap()),
        format!("--output-path={}", output_dir_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout").and(predicate::str::contains("Generated 2 pin tables")));

    // and
    assert_eq!(read_to_string(output_path.join("conn_1x02.csv"))?, indoc! {"
        name,number,type,shape,direction,decoration,section
        ~,1,passive,line,left,rectangle,
        ~,2,passive,line,left,rectangle,
    "});
    assert_eq!(read_to_string(output_path.join("conn_2x02.csv"))?, indoc! {"
        name,number,type,shape,direction,decoration,section
        ~,1,passive,line,left,point,
        ~,2,passive,line,right,point,
        ~,3,passive,line,left,point,
        ~,4,passive,line,right,point,
    "});

    Ok(())
}

#[test]
fn footprints_with_unknown_generator() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (_, footprints_file_name) = write_temp_file(&temp_dir, "footprints", "csv", indoc! {"
        generator,name,description,tags,package_width,package_height,pad_width,pad_height
        chip,R_0603,Chip resistor 0603,resistor,1.6,0.8,0.9,0.95
        qfp,QFP_44,,,10,10,0.3,1.5
    "});
    let (output_path, output_dir_name) = build_temp_dir(&temp_dir, "footprints");

    // and
    let args = [
        "footprints".to_string(),
        format!("--csv={}", footprints_file_name.to_str().unwrap()),
        format!("--output-path={}", output_dir_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout")
            .and(predicate::str::contains("Unknown footprint generator. generator: 'qfp', footprint: 'QFP_44'"))
            .and(predicate::str::contains("Generated 1 footprints"))
        );

    // and
    let footprint_content = read_to_string(output_path.join("R_0603.kicad_mod"))?;
    println!("{}", footprint_content);

    assert_contains_inorder!(footprint_content, [
        "(module R_0603 (layer F.Cu) (tedit ",
        "(attr smd)",
        "(descr \"Chip resistor 0603\")",
        "(tags \"resistor\")",
    ]);
    assert!(!output_path.join("QFP_44.kicad_mod").exists());

    Ok(())
}

#[test]
fn summary() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (_, library_file_name) = write_temp_file(&temp_dir, "resistor", "lib", RESISTOR_TEMPLATE);
    let (_, footprint_file_name) = write_temp_file(&temp_dir, "R_0603", "kicad_mod", "(module R_0603 (layer F.Cu) (tedit 00000000)\n)\n");
    let (summary_path, summary_file_name) = build_temp_file(&temp_dir, "summary", "txt");

    // and
    let args = [
        "summary".to_string(),
        format!("--libs={}", library_file_name.to_str().unwrap()),
        format!("--footprints={}", footprint_file_name.to_str().unwrap()),
        format!("--output={}", summary_file_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout"));

    // and
    let summary_content = read_to_string(summary_path)?;
    println!("{}", summary_content);

    assert_contains_inorder!(summary_content, [
        "Summary\n",
        "Symbols\n",
        "resistor.lib\n",
        "resistor\n",
        "Footprints\n",
        "R_0603.kicad_mod\n",
        "R_0603\n",
    ]);

    Ok(())
}

#[test]
fn project() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (project_path, project_file_name) = write_temp_file(&temp_dir, "library", "pro", indoc! {"
        update=22/05/2015 07:44:53
        last_client=kicad
        [general]
        version=1
        [eeschema/libraries]
        LibName1=power
    "});
    let (library_path, library_dir_name) = build_temp_dir(&temp_dir, "library");
    std::fs::write(library_path.join("resistor.lib"), RESISTOR_TEMPLATE)?;
    std::fs::write(library_path.join("connector.lib"), RESISTOR_TEMPLATE)?;
    std::fs::write(library_path.join("connector.dcm"), "")?;

    // and
    let args = [
        "project".to_string(),
        format!("--project={}", project_file_name.to_str().unwrap()),
        format!("--library-path={}", library_dir_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout"));

    // and
    assert_eq!(read_to_string(project_path)?, indoc! {"
        update=22/05/2015 07:44:53
        last_client=kicad
        [general]
        version=1
        [eeschema/libraries]
        LibName1=connector
        LibName2=resistor
    "});

    Ok(())
}

#[test]
fn readme_with_config() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (_, config_file_name) = write_temp_file(&temp_dir, "config", "json", r#"{ "symbol": { "pin_length": 300 } }"#);
    let (readme_path, readme_file_name) = build_temp_file(&temp_dir, "readme", "md");

    // and
    let args = [
        format!("--config={}", config_file_name.to_str().unwrap()),
        "readme".to_string(),
        format!("--output={}", readme_file_name.to_str().unwrap()),
    ];

    // when
    cmd.args(args)
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout"));

    // and
    let readme_content = read_to_string(readme_path)?;
    println!("{}", readme_content);

    assert_contains_inorder!(readme_content, [
        "## Symbol\n",
        "* **F0**: Reference\n",
        "* **F6**: Voltage\n",
        "* **SYMBOL_PIN_LENGTH**: 300\n",
        "## Footprint\n",
        "* **FOOTPRINT_EXTENSION**: .kicad_mod\n",
    ]);

    Ok(())
}

#[test]
fn argfile() -> Result<(), anyhow::Error> {
    // given
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_libgen"));
    let temp_dir = tempdir()?;

    // and
    let (readme_path, readme_file_name) = build_temp_file(&temp_dir, "readme", "md");
    let (_, args_file_name) = write_temp_file(&temp_dir, "args", "txt", &format!("readme\n--output={}\n", readme_file_name.to_str().unwrap()));

    // when
    cmd.args([format!("@{}", args_file_name.to_str().unwrap())])
        // then
        .assert()
        .success()
        .stderr(print("stderr"))
        .stdout(print("stdout"));

    // and
    assert!(readme_path.exists());

    Ok(())
}
