// Inline stylesheet for the rendered resume. No external fonts or assets.

pub const RESUME_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.6;
  color: #333;
  max-width: 800px;
  margin: 0 auto;
  padding: 40px 20px;
  background: white;
}
.header {
  text-align: center;
  margin-bottom: 40px;
  padding-bottom: 20px;
  border-bottom: 1px solid #e5e5e5;
}
.header h1 { font-size: 32px; font-weight: 600; margin-bottom: 8px; color: #1a1a1a; }
.header .title { font-size: 18px; color: #666; margin-bottom: 16px; }
.contact {
  font-size: 14px;
  color: #666;
  display: flex;
  justify-content: center;
  gap: 20px;
  flex-wrap: wrap;
}
.contact a { color: #666; text-decoration: none; }
.section { margin-bottom: 32px; }
.section h2 {
  font-size: 20px;
  font-weight: 600;
  color: #1a1a1a;
  margin-bottom: 16px;
  text-transform: uppercase;
  letter-spacing: 0.5px;
}
.summary { font-size: 16px; line-height: 1.7; color: #444; }
.job { margin-bottom: 24px; padding-bottom: 20px; border-bottom: 1px solid #f0f0f0; }
.job:last-child { border-bottom: none; margin-bottom: 0; }
.job-header { margin-bottom: 12px; }
.job-title { font-size: 18px; font-weight: 600; color: #1a1a1a; margin-bottom: 4px; }
.company-duration {
  display: flex;
  justify-content: space-between;
  align-items: center;
  margin-bottom: 8px;
}
.company { font-size: 16px; font-weight: 500; color: #333; }
.duration { font-size: 14px; color: #666; }
.location { font-size: 14px; color: #666; font-style: italic; }
.achievements { margin-top: 8px; }
.achievements ul { list-style: none; padding-left: 0; }
.achievements li {
  margin-bottom: 6px;
  padding-left: 16px;
  position: relative;
  font-size: 15px;
  line-height: 1.5;
}
.achievements li:before { content: "\2022"; position: absolute; left: 0; color: #666; }
.tech-stack { margin-top: 8px; font-size: 14px; color: #666; }
.tech-stack strong { color: #333; }
.skills-section {
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
  gap: 24px;
  margin-top: 16px;
}
.skill-group h3 { font-size: 16px; font-weight: 600; color: #1a1a1a; margin-bottom: 8px; }
.skill-list { font-size: 14px; line-height: 1.6; color: #444; }
.education-item { margin-bottom: 16px; }
.education-title { font-size: 16px; font-weight: 600; color: #1a1a1a; margin-bottom: 4px; }
.education-school { font-size: 15px; color: #333; margin-bottom: 2px; }
.education-duration { font-size: 14px; color: #666; margin-bottom: 6px; }
.education-description { font-size: 14px; color: #444; line-height: 1.5; }
.languages { font-size: 15px; color: #444; }
@media (max-width: 600px) {
  body { padding: 20px 15px; }
  .contact { flex-direction: column; gap: 8px; }
  .company-duration { flex-direction: column; align-items: flex-start; gap: 4px; }
  .skills-section { grid-template-columns: 1fr; gap: 16px; }
}
"#;
