//! Builtin agent personas and their task templates.
//!
//! The persona and task texts carry `{topic}` placeholders that are resolved
//! from the kickoff inputs. Every persona has exactly one task template under
//! the same key.

use crate::agent::{Agent, AgentModelConfig};
use crate::crew::Crew;
use crate::llm::LlmProvider;
use crate::task::Task;
use serde::Serialize;
use std::sync::Arc;

const SEARCH_TOOL: &str = "serper_search";

#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub name: String,
    pub role: String,
    pub goal: String,
    pub backstory: String,
    /// One-line goal summary shown in the agent picker
    pub summary: String,
    pub tools: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Unknown agent: {0}")]
    UnknownPersona(String),
    #[error(transparent)]
    Crew(#[from] crate::crew::CrewError),
}

fn persona(
    name: &str,
    role: &str,
    goal: &str,
    backstory: &str,
    summary: &str,
    with_search: bool,
) -> Persona {
    Persona {
        name: name.to_string(),
        role: role.to_string(),
        goal: goal.to_string(),
        backstory: backstory.to_string(),
        summary: summary.to_string(),
        tools: if with_search {
            vec![SEARCH_TOOL.to_string()]
        } else {
            vec![]
        },
    }
}

/// The seven builtin personas, in display order
pub fn builtin_personas() -> Vec<Persona> {
    vec![
        persona(
            "Researcher",
            "Lead Research Scientist",
            "Uncover cutting-edge developments in {topic}",
            "You're a seasoned researcher with a knack for uncovering the latest developments in {topic}. \
             Known for your ability to find the most relevant information and present it in a clear and concise manner. \
             You have a deep understanding of research methodologies and are skilled at using various research tools and databases. \
             Your analytical skills allow you to sift through large amounts of data to identify key insights and trends. \
             You are committed to staying up-to-date with the latest advancements in your field and are always looking for new ways to improve your research techniques.",
            "Conduct thorough research to gather relevant information for {topic}.",
            true,
        ),
        persona(
            "Reporting Analyst",
            "Reporting Analyst",
            "Create detailed reports based on {topic} data analysis and research findings",
            "You're a meticulous analyst with a keen eye for detail. You're known for your ability to turn complex data \
             into clear and concise reports, making it easy for others to understand and act on the information you provide. \
             You have a strong background in data analysis and are proficient in using various analytical tools and software. \
             Your reports are well-structured and include comprehensive data visualizations that highlight key findings. \
             You are skilled at identifying patterns and trends in data and are able to provide actionable insights that drive decision-making.",
            "Analyze data and create insightful reports on {topic}.",
            true,
        ),
        persona(
            "Writer",
            "Creative Writer",
            "Craft compelling and engaging written content about {topic}",
            "You're a passionate writer with a flair for storytelling. You have a knack for transforming ideas into words \
             that captivate readers and evoke emotions, making {topic} come alive in your writing. \
             You have a strong command of language and are skilled at writing in various styles and tones. \
             Your writing is engaging and persuasive, and you have a talent for making complex topics accessible to a wide audience. \
             You are always looking for new ways to connect with your readers and are committed to producing high-quality content that resonates with them.",
            "Write engaging and informative content about {topic}.",
            false,
        ),
        persona(
            "Editor",
            "Content Editor",
            "Refine and polish written content to ensure clarity, coherence, and quality",
            "You're an expert editor with an eye for detail and a commitment to excellence. \
             Known for your ability to enhance content without losing its original essence, you ensure that every piece about {topic} is flawless and impactful. \
             You have a strong background in editing and are proficient in using various editing tools and software. \
             Your editing process is thorough and meticulous, and you are skilled at identifying and correcting errors in grammar, punctuation, and style. \
             You are committed to maintaining the highest standards of quality in your work and are always looking for ways to improve the clarity and coherence of the content you edit.",
            "Edit and refine content to ensure clarity and quality.",
            false,
        ),
        persona(
            "Event Planner",
            "Event Coordinator",
            "Plan and organize successful events centered around {topic}",
            "You're a seasoned event planner with a talent for turning visions into reality. \
             Known for your creativity and attention to detail, you excel at orchestrating events that leave a lasting impression on attendees. \
             You have a strong background in event planning and are proficient in using various event management tools and software. \
             Your events are well-organized and run smoothly, and you are skilled at managing all aspects of event planning, from budgeting and scheduling to logistics and coordination. \
             You are committed to creating memorable experiences for attendees and are always looking for new ways to make your events more engaging and impactful.",
            "Organize and plan events related to {topic}.",
            true,
        ),
        persona(
            "Risk Analyst",
            "Risk Analyst",
            "Identify, assess, and mitigate potential risks associated with {topic}",
            "You're a detail-oriented risk analyst with expertise in identifying potential pitfalls and crafting strategies to minimize impact. \
             Your insights are critical for ensuring success in initiatives related to {topic}. \
             You have a strong background in risk analysis and are proficient in using various risk management tools and software. \
             Your risk assessments are thorough and comprehensive, and you are skilled at identifying and analyzing potential risks and their impact. \
             You are committed to developing effective risk mitigation strategies and are always looking for new ways to improve your risk management processes.",
            "Assess and mitigate potential risks related to {topic}.",
            true,
        ),
        persona(
            "Content Planner",
            "Content Strategist",
            "Develop and implement a comprehensive content plan for {topic}",
            "You're a strategic thinker with a deep understanding of audience engagement. \
             Known for your ability to design content strategies that align with objectives, you ensure that every piece of content about {topic} serves its purpose effectively. \
             You have a strong background in content planning and are proficient in using various content management tools and software. \
             Your content plans are well-structured and include detailed content calendars, target audience analysis, and key performance indicators. \
             You are skilled at identifying content opportunities and are committed to creating content that resonates with your audience and drives engagement.",
            "Develop and implement a comprehensive content plan for {topic}.",
            true,
        ),
    ]
}

/// Look up a single persona by name
pub fn find_persona(name: &str) -> Option<Persona> {
    builtin_personas()
        .into_iter()
        .find(|persona| persona.name == name)
}

/// Task template for a persona, keyed by the persona name
pub fn task_for(name: &str) -> Option<Task> {
    let (description, expected_output) = match name {
        "Researcher" => (
            "1. Conduct comprehensive research on {topic} including:\n\
             - Recent developments and news\n\
             - Key industry trends and innovations\n\
             - Expert opinions and analyses\n\
             - Statistical data and market insights\n\
             2. Evaluate source credibility and fact-check all information\n\
             3. Organize findings into a structured research brief\n\
             4. Include all relevant citations and sources\n\
             5. Ensure the research covers multiple perspectives and is unbiased\n\
             6. Highlight any potential future trends or predictions related to the topic",
            "A detailed research report containing:\n\
             - Executive summary of key findings\n\
             - Comprehensive analysis of current trends and developments\n\
             - List of verified facts and statistics\n\
             - All citations and links to original sources\n\
             - Clear categorization of main themes and patterns\n\
             - Potential future trends or predictions\n\
             Please format with clear sections and bullet points for easy reference.",
        ),
        "Reporting Analyst" => (
            "Review the context you got and expand each topic into a full section for a report.\n\
             Make sure the report is detailed and contains any and all relevant information.\n\
             Ensure the report is well-structured and logically organized.\n\
             Include any relevant case studies or real-world examples to support the information.",
            "A fully fledged report with the main topics, each with a full section of information.\n\
             Formatted as markdown without '```'.\n\
             Each section should include:\n\
             - An introduction to the topic\n\
             - Detailed analysis and discussion\n\
             - Relevant case studies or examples\n\
             - Conclusion summarizing the key points",
        ),
        "Writer" => (
            "Write an engaging and creative article about {topic}.\n\
             Ensure the tone aligns with the intended audience and purpose.\n\
             Use storytelling techniques to make the article captivating.\n\
             Include quotes from experts or relevant personalities if possible.",
            "A well-written article of approximately 1000 words, formatted as markdown without '```',\n\
             with an introduction, body, and conclusion that captivates readers.\n\
             The article should include:\n\
             - A compelling introduction that hooks the reader\n\
             - A well-structured body with clear subheadings\n\
             - Quotes or insights from experts\n\
             - A conclusion that reinforces the main points and provides a call to action or thought-provoking statement",
        ),
        "Editor" => (
            "Edit and refine the draft content related to {topic}.\n\
             Ensure the content is clear, concise, error-free, and adheres to the required style guide.\n\
             Provide constructive feedback and suggestions for further improvements.",
            "A polished version of the content with all necessary corrections and enhancements.\n\
             Comments and suggestions should be provided where applicable for further improvements.\n\
             The edited content should:\n\
             - Be free of grammatical and spelling errors\n\
             - Have improved clarity and readability\n\
             - Adhere to the specified style guide\n\
             - Include any additional suggestions for enhancing the content",
        ),
        "Event Planner" => (
            "Create a detailed plan for an event focused on {topic}.\n\
             Include the agenda, list of activities, resource requirements, and a proposed timeline.\n\
             Consider potential challenges and include contingency plans.",
            "A comprehensive event plan document, formatted as markdown without '```',\n\
             with a clear agenda, budget estimation, and a timeline for execution.\n\
             The event plan should include:\n\
             - A detailed agenda with time slots for each activity\n\
             - List of required resources and their estimated costs\n\
             - Proposed timeline for planning and execution\n\
             - Contingency plans for potential challenges",
        ),
        "Risk Analyst" => (
            "Conduct a thorough risk assessment for {topic}.\n\
             Identify potential risks, analyze their impact, and suggest mitigation strategies.\n\
             Include both short-term and long-term risks.",
            "A risk assessment report formatted as markdown without '```',\n\
             listing potential risks, their likelihood and impact, and recommended solutions.\n\
             The report should include:\n\
             - A table or list of identified risks\n\
             - Analysis of the likelihood and potential impact of each risk\n\
             - Suggested mitigation strategies for each risk\n\
             - Consideration of both short-term and long-term risks",
        ),
        "Content Planner" => (
            "Create a comprehensive content plan for {topic}.\n\
             Include a content calendar, target audience analysis, and key performance indicators.\n\
             Consider potential challenges and include contingency plans.",
            "A comprehensive content plan document, formatted as markdown without '```',\n\
             with a content calendar and a timeline for execution.\n\
             The content plan should include:\n\
             - A content calendar with publication slots for each piece\n\
             - Target audience analysis\n\
             - Key performance indicators for measuring success\n\
             - Contingency plans for potential challenges",
        ),
        _ => return None,
    };
    Some(Task::new(
        description.to_string(),
        Some(expected_output.to_string()),
        name.to_string(),
    ))
}

/// Assemble a crew from a selection of persona names, in selection order
pub fn crew_for(
    selected: &[String],
    llm_config: &AgentModelConfig,
    provider: Arc<dyn LlmProvider>,
) -> Result<Crew, CatalogError> {
    let mut agents = Vec::new();
    let mut tasks = Vec::new();

    for name in selected {
        let persona =
            find_persona(name).ok_or_else(|| CatalogError::UnknownPersona(name.clone()))?;
        let task =
            task_for(name).ok_or_else(|| CatalogError::UnknownPersona(name.clone()))?;

        agents.push(Agent::new(
            persona.name,
            persona.role,
            persona.goal,
            persona.backstory,
            persona.tools,
            false,
            true,
            llm_config.clone(),
            provider.clone(),
        ));
        tasks.push(task);
    }

    Ok(Crew::new(agents, tasks, true)?)
}
