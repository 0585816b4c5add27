use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use search_query_lexer::sql::SqlRenderer;
use search_query_lexer::{Config, Lexer};

const DEFAULT_CONFIG_PATH: &str = "lexer_config.json";
const TABLE_NAME: &str = "records";

/// 加载配置，优先使用JSON配置文件，失败时使用默认配置
fn load_config(path: &str) -> Config {
    match Config::from_json_file(path) {
        Ok(config) => {
            println!("✅ 成功从JSON配置文件加载: {}", path);
            config
        }
        Err(e) => {
            println!("⚠️ 无法加载JSON配置文件 ({}), 使用默认配置", e);
            Config::with_field_names(["title", "age", "category"])
        }
    }
}

fn print_config(config: &Config) {
    println!("\n[配置信息]:");
    println!("比较符: {:?}", config.comparators.symbols());
    println!("连接词: {:?}", config.connectives.symbols());
    println!("字段名: {:?}", config.field_names);
}

/// 处理一行输入：分词并生成SQL
fn process_line(lexer: &Lexer, renderer: &SqlRenderer, line: &str) {
    let tokens = match lexer.tokenize(line) {
        Ok(tokens) => tokens,
        Err(e) => {
            println!("✗ 分词失败:\n{}", e);
            if !e.tokens.is_empty() {
                println!("出错前已生成 {} 个 token", e.tokens.len());
            }
            return;
        }
    };

    println!("[Tokens]:");
    for token in &tokens {
        println!("  {}", token);
    }

    match renderer.render_select(TABLE_NAME, &tokens) {
        Ok(sql) => println!("[SQL]:\n  {}", sql),
        Err(e) => println!("✗ SQL 生成失败: {}", e),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    println!("--- Search Query Lexer: 查询分词与SQL生成 ---");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = load_config(&path);
    print_config(&config);

    let renderer = SqlRenderer::new(&config);
    let lexer = Lexer::new(config).context("配置无效")?;

    println!("\n输入查询，例如: (title=~\"test\" and age >= 30) or (category != \"bad\")");
    println!("Ctrl-C 或 Ctrl-D 退出\n");

    let mut editor = DefaultEditor::new().context("无法初始化命令行编辑器")?;
    loop {
        match editor.readline(">> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                editor.add_history_entry(line)?;
                process_line(&lexer, &renderer, line);
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e).context("读取输入失败"),
        }
    }

    Ok(())
}
