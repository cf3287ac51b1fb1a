use restamp::PostProcessor;

use super::RequestArgs;

pub async fn build(request: &RequestArgs, json: bool) -> anyhow::Result<()> {
    let (config, artifact) = request.load()?;
    let processor = PostProcessor::new(config)?;

    let outcome = processor.post_process(&artifact).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("Built image: {}", outcome.artifact.id());
    }
    Ok(())
}
